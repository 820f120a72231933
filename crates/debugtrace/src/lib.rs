//! Indented call tracing and value pretty-printing for debug builds.
//!
//! ```
//! use debugtrace::{trace_enter, trace_print};
//!
//! fn add(a: i32, b: i32) -> i32 {
//!     trace_enter!();
//!     trace_print!(a);
//!     trace_print!(b);
//!     a + b
//! }
//!
//! add(1, 2);
//! ```
//!
//! writes, to stderr by default:
//!
//! ```text
//! 2026-01-02 03:04:05+0900 DebugTrace-rs 0.1.0
//! 2026-01-02 03:04:05+0900
//! 2026-01-02 03:04:05+0900 Enter rust_out::main::add (lib.rs:5)
//! 2026-01-02 03:04:05+0900 | a = 1 (lib.rs:6)
//! 2026-01-02 03:04:05+0900 | b = 2 (lib.rs:7)
//! 2026-01-02 03:04:05+0900 Leave rust_out::main::add (lib.rs)
//! ```
//!
//! The macros are compiled out when the default `enabled` feature is off.
//! The functions below always trace; they are the building blocks of the
//! macros and of hosts that want explicit control.
//!
//! Values are converted through [`Traceable`]; wrap types without an impl
//! in [`display`] or [`debug`].

mod macros;

#[doc(hidden)]
pub mod __private;

pub use debugtrace_core::{
    CP_US_ASCII, CP_UTF8, Clock, CodePageEncoder, EncodingError, FixedClock, SystemClock,
    TextEncoder, TypeNameStyle,
};
pub use debugtrace_engine::{RenderOptions, Renderer, render, render_lines};
pub use debugtrace_runtime::{
    ColorMode, Config, Error, FileSink, MemorySink, Result, Scope, Sink, SinkTarget, StderrSink,
    StdoutSink, Tracer, global, with_global,
};
pub use debugtrace_types::{
    Debugged, Displayed, SourceLocation, Traceable, U32Str, Value, WideStr, WideString, debug,
    display,
};

use std::borrow::Cow;
use std::panic::Location;

/// Enter a traced scope on the process-wide tracer. Leave is written when
/// the returned guard is dropped.
#[track_caller]
pub fn enter(function: impl Into<Cow<'static, str>>) -> Scope<'static> {
    enter_at(function, Some(Location::caller().into()))
}

pub fn enter_at(
    function: impl Into<Cow<'static, str>>,
    location: Option<SourceLocation>,
) -> Scope<'static> {
    Scope::enter(global(), function, location)
}

/// Write `name = value` at the current nesting depth.
#[track_caller]
pub fn print<T: Traceable + ?Sized>(name: &str, value: &T) {
    print_at(name, value, Some(Location::caller().into()));
}

pub fn print_at<T: Traceable + ?Sized>(name: &str, value: &T, location: Option<SourceLocation>) {
    // Converting may run host code that traces, so it happens before locking.
    let value = value.to_value();
    with_global(|tracer| tracer.print_value(name, &value, location));
}

#[track_caller]
pub fn message(text: &str) {
    message_at(text, Some(Location::caller().into()));
}

pub fn message_at(text: &str, location: Option<SourceLocation>) {
    with_global(|tracer| tracer.print_message(text, location));
}

/// Edit the process-wide configuration.
pub fn configure<F>(edit: F) -> Result<()>
where
    F: FnOnce(&mut Config),
{
    with_global(|tracer| tracer.configure(edit))
}

/// Snapshot of the process-wide configuration.
pub fn config() -> Config {
    with_global(|tracer| tracer.config().clone())
}

/// Back to the default configuration, zero nesting and a fresh banner.
/// The current sink and clock are kept.
pub fn reset() {
    with_global(Tracer::reset);
}

pub fn set_sink(sink: Box<dyn Sink>) {
    with_global(|tracer| tracer.set_sink(sink));
}

pub fn set_clock(clock: Box<dyn Clock>) {
    with_global(|tracer| tracer.set_clock(clock));
}

pub fn set_code_page(code_page: u32) -> Result<()> {
    with_global(|tracer| tracer.set_code_page(code_page))
}

/// Lines the sink failed to write since the last reset.
pub fn dropped_lines() -> u64 {
    with_global(|tracer| tracer.dropped_lines())
}
