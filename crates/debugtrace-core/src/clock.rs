use chrono::{DateTime, FixedOffset, Local};
use std::fmt::Write;

/// strftime-style pattern used when none is configured (or the configured one is invalid).
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";

/// Source of the timestamp printed at the start of every line.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always returns the same instant; makes trace output reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<FixedOffset>);

impl FixedClock {
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Format `time` with a strftime-style pattern.
///
/// chrono reports an unknown specifier as a formatting error at display
/// time; such patterns fall back to [`DEFAULT_DATETIME_FORMAT`].
pub fn format_timestamp(time: &DateTime<FixedOffset>, format: &str) -> String {
    let mut formatted = String::new();
    if write!(formatted, "{}", time.format(format)).is_ok() {
        return formatted;
    }
    time.format(DEFAULT_DATETIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_time() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-01-02T03:04:05+09:00").unwrap()
    }

    #[test]
    fn test_default_format() {
        assert_eq!(
            format_timestamp(&sample_time(), DEFAULT_DATETIME_FORMAT),
            "2026-01-02 03:04:05+0900"
        );
    }

    #[test]
    fn test_custom_format() {
        assert_eq!(format_timestamp(&sample_time(), "%H:%M:%S"), "03:04:05");
    }

    #[test]
    fn test_invalid_format_falls_back() {
        assert_eq!(
            format_timestamp(&sample_time(), "%Q"),
            "2026-01-02 03:04:05+0900"
        );
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(sample_time());
        assert_eq!(clock.now(), sample_time());
    }
}
