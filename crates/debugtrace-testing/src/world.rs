//! TraceWorld pattern for isolated tracer tests.
//!
//! Each world owns its own tracer, so tests never share nesting state or
//! output with the process-wide instance.

use anyhow::Result;
use debugtrace_runtime::{Config, MemorySink, Scope, Tracer, lock};
use debugtrace_types::{SourceLocation, Traceable};
use std::sync::Mutex;
use tempfile::TempDir;

use crate::assertions::assert_enter_leave_balanced;
use crate::fixtures::{fixed_clock, strip_timestamps};

/// Number of lines written before the first traced line (banner and blank).
pub const BANNER_LINES: usize = 2;

/// Isolated tracer writing to memory with a fixed clock.
///
/// # Example
/// ```
/// use debugtrace_testing::TraceWorld;
///
/// let world = TraceWorld::new();
/// {
///     let _scope = world.enter("main");
///     world.print("answer", &42);
/// }
/// assert_eq!(world.payloads(), ["Enter main", "| answer = 42", "Leave main"]);
/// ```
pub struct TraceWorld {
    tracer: Mutex<Tracer>,
    sink: MemorySink,
    config_dir: Option<TempDir>,
}

impl Default for TraceWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceWorld {
    /// Create a world with the default configuration.
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    fn from_config(config: Config) -> Self {
        let sink = MemorySink::new();
        let tracer =
            Tracer::with_sink(config, Box::new(sink.clone())).with_clock(Box::new(fixed_clock()));

        Self {
            tracer: Mutex::new(tracer),
            sink,
            config_dir: None,
        }
    }

    /// Edit the configuration. Leave `sink` alone, or output is no longer captured.
    pub fn with_config<F>(self, edit: F) -> Self
    where
        F: FnOnce(&mut Config),
    {
        lock(&self.tracer)
            .configure(edit)
            .expect("Failed to apply configuration");
        self
    }

    /// Build a world from TOML config text, loaded through a real file.
    pub fn with_config_file(contents: &str) -> Result<Self> {
        let config_dir = TempDir::new()?;
        let path = config_dir.path().join("debugtrace.toml");
        std::fs::write(&path, contents)?;

        let config = Config::load_from(&path)?;
        let mut world = Self::from_config(config);
        world.config_dir = Some(config_dir);
        Ok(world)
    }

    pub fn tracer(&self) -> &Mutex<Tracer> {
        &self.tracer
    }

    pub fn sink(&self) -> &MemorySink {
        &self.sink
    }

    pub fn enter(&self, function: &'static str) -> Scope<'_> {
        Scope::enter(&self.tracer, function, None)
    }

    pub fn enter_at(&self, function: &'static str, file: &'static str, line: u32) -> Scope<'_> {
        Scope::enter(&self.tracer, function, Some(SourceLocation::new(file, line)))
    }

    pub fn print<T: Traceable + ?Sized>(&self, name: &str, value: &T) {
        let value = value.to_value();
        lock(&self.tracer).print_value(name, &value, None);
    }

    pub fn message(&self, text: &str) {
        lock(&self.tracer).print_message(text, None);
    }

    /// Raw captured lines, timestamps included.
    pub fn lines(&self) -> Vec<String> {
        self.sink.lines()
    }

    /// Captured lines without timestamps and without the banner.
    pub fn payloads(&self) -> Vec<String> {
        strip_timestamps(&self.sink.lines())
            .into_iter()
            .skip(BANNER_LINES)
            .collect()
    }

    pub fn assert_balanced(&self) -> Result<()> {
        let code_indent = lock(&self.tracer).config().code_indent_string.clone();
        assert_enter_leave_balanced(&self.payloads(), &code_indent)
    }
}
