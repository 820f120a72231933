//! Testing infrastructure for debugtrace tests.
//!
//! - `TraceWorld`: isolated tracer with captured output
//! - `assertions`: checks over captured trace lines
//! - `fixtures`: deterministic clock and timestamp helpers

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::TraceWorld;
