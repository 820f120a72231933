use crate::scope::lock;
use crate::tracer::Tracer;
use once_cell::sync::Lazy;
use std::sync::Mutex;

static TRACER: Lazy<Mutex<Tracer>> = Lazy::new(|| Mutex::new(Tracer::from_environment()));

/// The process-wide tracer, created from the config file on first use.
pub fn global() -> &'static Mutex<Tracer> {
    &TRACER
}

/// Run `f` with exclusive access to the process-wide tracer.
pub fn with_global<R>(f: impl FnOnce(&mut Tracer) -> R) -> R {
    f(&mut lock(global()))
}
