//! Deterministic inputs for trace output.

use chrono::{DateTime, FixedOffset, TimeZone};
use debugtrace_core::FixedClock;
use regex::Regex;
use std::sync::LazyLock;

/// Timestamp printed by [`fixed_clock`] with the default datetime format.
pub const FIXED_TIMESTAMP: &str = "2026-01-02 03:04:05+0900";

static TIMESTAMP_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}[+-]\d{4} ?").expect("valid timestamp regex")
});

/// The instant behind [`FIXED_TIMESTAMP`].
pub fn fixed_time() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(9 * 3600)
        .and_then(|offset| offset.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).single())
        .expect("valid fixed time")
}

pub fn fixed_clock() -> FixedClock {
    FixedClock::new(fixed_time())
}

/// Drop the default-format timestamp (and the space after it) from each
/// line, along with trailing whitespace.
pub fn strip_timestamps(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| TIMESTAMP_PREFIX.replace(line, "").trim_end().to_string())
        .collect()
}
