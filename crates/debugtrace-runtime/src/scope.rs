use crate::tracer::Tracer;
use debugtrace_types::SourceLocation;
use std::borrow::Cow;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a shared tracer, recovering it if a previous holder panicked.
pub fn lock(tracer: &Mutex<Tracer>) -> MutexGuard<'_, Tracer> {
    tracer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A traced function activation.
///
/// Writes the Enter line when created and the Leave line when dropped,
/// including drops during panic unwinding.
#[must_use = "the Leave line is written as soon as the scope is dropped"]
pub struct Scope<'a> {
    tracer: &'a Mutex<Tracer>,
    function: Cow<'static, str>,
    location: Option<SourceLocation>,
}

impl<'a> Scope<'a> {
    pub fn enter(
        tracer: &'a Mutex<Tracer>,
        function: impl Into<Cow<'static, str>>,
        location: Option<SourceLocation>,
    ) -> Self {
        let function = function.into();
        lock(tracer).enter(&function, location);
        Self {
            tracer,
            function,
            location,
        }
    }

    pub fn function(&self) -> &str {
        &self.function
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        lock(self.tracer).leave(&self.function, self.location);
    }
}
