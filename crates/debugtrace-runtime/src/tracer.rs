use crate::Result;
use crate::config::{ColorMode, Config};
use crate::sink::{Sink, StderrSink, open_sink};
use crate::state::NestingState;
use debugtrace_core::{
    Clock, CodePageEncoder, SystemClock, TextEncoder, format_timestamp, indent_string,
    short_file_name,
};
use debugtrace_engine::render_lines;
use debugtrace_types::{SourceLocation, Traceable, Value};
use owo_colors::OwoColorize;
use std::fmt::Write;

/// First line written by every tracer.
pub const START_MESSAGE: &str = concat!("DebugTrace-rs ", env!("CARGO_PKG_VERSION"));

/// Trace context: configuration, nesting counters and output.
///
/// All trace operations are infallible. Lines the sink refuses are counted
/// in [`Tracer::dropped_lines`] instead of being reported to the caller.
pub struct Tracer {
    config: Config,
    state: NestingState,
    sink: Box<dyn Sink>,
    clock: Box<dyn Clock>,
    encoder: Option<Box<dyn TextEncoder>>,
    initialized: bool,
    dropped_lines: u64,
    pending_warnings: Vec<String>,
}

impl Tracer {
    /// Create a tracer writing to the sink named in `config`.
    pub fn new(config: Config) -> Result<Self> {
        let sink = open_sink(&config.sink)?;
        Ok(Self::with_sink(config, sink))
    }

    /// Create a tracer writing to `sink`, ignoring `config.sink`.
    pub fn with_sink(config: Config, sink: Box<dyn Sink>) -> Self {
        Self {
            config,
            state: NestingState::new(),
            sink,
            clock: Box::new(SystemClock),
            encoder: None,
            initialized: false,
            dropped_lines: 0,
            pending_warnings: Vec::new(),
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Tracer for the process-wide instance: loads the config file and
    /// falls back to defaults (with a warning line after the banner) when
    /// the file or its sink cannot be used.
    pub fn from_environment() -> Self {
        let mut warnings = Vec::new();

        let config = Config::load().unwrap_or_else(|err| {
            warnings.push(format!("debugtrace: using default configuration ({})", err));
            Config::default()
        });
        let sink = open_sink(&config.sink).unwrap_or_else(|err| {
            warnings.push(format!("debugtrace: writing to stderr ({})", err));
            Box::new(StderrSink)
        });

        let mut tracer = Self::with_sink(config, sink);
        tracer.pending_warnings = warnings;
        tracer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn code_level(&self) -> usize {
        self.state.code_level()
    }

    pub fn dropped_lines(&self) -> u64 {
        self.dropped_lines
    }

    /// Edit the configuration in place. A changed `sink` is reopened; if
    /// that fails the previous sink and target are kept.
    pub fn configure<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Config),
    {
        let previous_sink = self.config.sink.clone();
        edit(&mut self.config);

        if self.config.sink != previous_sink {
            match open_sink(&self.config.sink) {
                Ok(sink) => self.sink = sink,
                Err(err) => {
                    self.config.sink = previous_sink;
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    pub fn set_sink(&mut self, sink: Box<dyn Sink>) {
        self.sink = sink;
    }

    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = clock;
    }

    /// Replace the code-page encoder with a custom text encoding service.
    pub fn set_encoder(&mut self, encoder: Box<dyn TextEncoder>) {
        self.encoder = Some(encoder);
    }

    pub fn set_code_page(&mut self, code_page: u32) -> Result<()> {
        CodePageEncoder::try_new(code_page)?;
        self.config.code_page = code_page;
        self.encoder = None;
        Ok(())
    }

    /// Restore default configuration and clear nesting, the banner latch
    /// and the dropped line count. The sink and clock are kept.
    pub fn reset(&mut self) {
        self.config = Config::default();
        self.state.reset();
        self.encoder = None;
        self.initialized = false;
        self.dropped_lines = 0;
        self.pending_warnings.clear();
    }

    pub fn enter(&mut self, function: &str, location: Option<SourceLocation>) {
        self.initialize();

        if self.state.returned_from_deeper() {
            self.emit(None, "", None);
        }

        let label = self.config.enter_string.clone();
        self.emit(Some(&label), function, location);
        self.state.enter();
    }

    /// Leave lines carry the file name only.
    pub fn leave(&mut self, function: &str, location: Option<SourceLocation>) {
        self.initialize();
        self.state.leave();

        let label = self.config.leave_string.clone();
        self.emit(Some(&label), function, location.map(SourceLocation::file_only));
    }

    pub fn print_message(&mut self, message: &str, location: Option<SourceLocation>) {
        self.initialize();
        self.emit(None, message, location);
    }

    pub fn print<T: Traceable + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
        location: Option<SourceLocation>,
    ) {
        self.print_value(name, &value.to_value(), location);
    }

    /// Write `name = value`; continuation lines of a multi-line value follow
    /// without the name and the location goes on the last line.
    pub fn print_value(&mut self, name: &str, value: &Value, location: Option<SourceLocation>) {
        self.initialize();

        let lines = self.render(value);
        let last = lines.len().saturating_sub(1);
        for (index, line) in lines.iter().enumerate() {
            let message = if index == 0 {
                format!("{}{}{}", name, self.config.varname_value_separator, line)
            } else {
                line.clone()
            };
            let location = if index == last { location } else { None };
            self.emit(None, &message, location);
        }
    }

    /// Render a value with the current configuration without writing it.
    pub fn render(&self, value: &Value) -> Vec<String> {
        let options = self.config.render_options();
        match &self.encoder {
            Some(encoder) => render_lines(value, &options, &**encoder),
            None => render_lines(
                value,
                &options,
                &CodePageEncoder::new(self.config.code_page),
            ),
        }
    }

    fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        self.emit(None, START_MESSAGE, None);
        self.emit(None, "", None);
        for warning in std::mem::take(&mut self.pending_warnings) {
            self.emit(None, &warning, None);
        }
    }

    fn emit(&mut self, label: Option<&str>, message: &str, location: Option<SourceLocation>) {
        let line = self.format_line(label, message, location);
        if self.sink.write_line(&line).is_err() {
            self.dropped_lines += 1;
        }
    }

    fn format_line(
        &self,
        label: Option<&str>,
        message: &str,
        location: Option<SourceLocation>,
    ) -> String {
        let color = self.use_color();
        let timestamp = format_timestamp(&self.clock.now(), &self.config.log_datetime_format);
        let indent = indent_string(
            &self.config.code_indent_string,
            self.state.code_level(),
            self.config.maximum_indents,
        );

        let mut line = String::new();
        if color {
            let _ = write!(line, "{}", timestamp.bright_black());
        } else {
            line.push_str(&timestamp);
        }
        line.push(' ');
        line.push_str(&indent);

        if let Some(label) = label {
            if color {
                let _ = write!(line, "{}", label.bold());
            } else {
                line.push_str(label);
            }
        }
        line.push_str(message);

        if let Some(location) = location {
            let _ = write!(line, " ({}", short_file_name(location.file));
            if let Some(line_number) = location.line {
                let _ = write!(line, ":{}", line_number);
            }
            line.push(')');
        }
        line
    }

    fn use_color(&self) -> bool {
        if !self.sink.accepts_color() {
            return false;
        }
        match self.config.color {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => self.sink.is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use chrono::DateTime;
    use debugtrace_core::FixedClock;
    use std::io;

    const STAMP: &str = "2026-01-02 03:04:05+0900 ";

    fn tracer() -> (Tracer, MemorySink) {
        let sink = MemorySink::new();
        let time = DateTime::parse_from_rfc3339("2026-01-02T03:04:05+09:00").unwrap();
        let tracer = Tracer::with_sink(Config::default(), Box::new(sink.clone()))
            .with_clock(Box::new(FixedClock::new(time)));
        (tracer, sink)
    }

    fn payloads(sink: &MemorySink) -> Vec<String> {
        sink.lines()
            .iter()
            .map(|line| line.strip_prefix(STAMP).unwrap_or(line).trim_end().to_string())
            .collect()
    }

    #[test]
    fn test_banner_is_written_once() {
        let (mut tracer, sink) = tracer();
        tracer.print_message("one", None);
        tracer.print_message("two", None);

        let lines = sink.lines();
        assert_eq!(lines[0], format!("{}{}", STAMP, START_MESSAGE));
        assert_eq!(lines[1], STAMP);
        assert_eq!(payloads(&sink)[2..], ["one", "two"]);
    }

    #[test]
    fn test_nested_scopes() {
        let (mut tracer, sink) = tracer();
        let location = SourceLocation::new("src/app/main.rs", 10);

        tracer.enter("a", Some(location));
        tracer.enter("b", Some(SourceLocation::new("src/app/main.rs", 20)));
        tracer.leave("b", Some(location));
        tracer.leave("a", Some(location));

        insta::assert_snapshot!(payloads(&sink)[2..].join("\n"), @r"
Enter a (main.rs:10)
| Enter b (main.rs:20)
| Leave b (main.rs)
Leave a (main.rs)
");
        assert_eq!(tracer.code_level(), 0);
    }

    #[test]
    fn test_blank_line_between_sibling_blocks() {
        let (mut tracer, sink) = tracer();
        tracer.enter("a", None);
        tracer.enter("b", None);
        tracer.leave("b", None);
        tracer.enter("c", None);
        tracer.leave("c", None);
        tracer.leave("a", None);
        tracer.enter("d", None);
        tracer.leave("d", None);

        assert_eq!(
            payloads(&sink)[2..],
            [
                "Enter a",
                "| Enter b",
                "| Leave b",
                "|",
                "| Enter c",
                "| Leave c",
                "Leave a",
                "",
                "Enter d",
                "Leave d",
            ]
        );
    }

    #[test]
    fn test_print_value_lines() {
        let (mut tracer, sink) = tracer();
        tracer.configure(|config| config.maximum_data_output_width = 20).unwrap();
        tracer.enter("f", None);
        tracer.print("v", &vec![vec![1, 2, 3]], Some(SourceLocation::new("lib.rs", 7)));
        tracer.print("flag", &true, None);
        tracer.leave("f", None);

        insta::assert_snapshot!(payloads(&sink)[2..].join("\n"), @r"
Enter f
| v = (Vec<Vec<i32>> size:1){
|   (Vec<i32> size:3){
|     1,
|     2,
|     3,
|   },
| } (lib.rs:7)
| flag = true
Leave f
");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let (mut tracer, sink) = tracer();
        tracer
            .configure(|config| config.enter_string = "-> ".to_string())
            .unwrap();
        tracer.enter("a", None);
        tracer.reset();
        sink.clear();

        assert_eq!(tracer.config(), &Config::default());
        assert_eq!(tracer.code_level(), 0);

        tracer.enter("b", None);
        assert_eq!(payloads(&sink)[0], START_MESSAGE);
        assert_eq!(payloads(&sink)[2], "Enter b");
    }

    #[test]
    fn test_code_page() {
        let (mut tracer, sink) = tracer();
        assert!(tracer.set_code_page(932).is_err());
        assert_eq!(tracer.config().code_page, 65001);

        tracer.set_code_page(debugtrace_core::CP_US_ASCII).unwrap();
        let wide = debugtrace_types::WideString::from("é");
        tracer.print("w", &wide, None);
        assert_eq!(
            payloads(&sink)[2],
            "w = (WideString)\"<Cannot convert the wide string to string>\""
        );
    }

    struct FailingSink;

    impl Sink for FailingSink {
        fn write_line(&mut self, _line: &str) -> io::Result<()> {
            Err(io::Error::other("closed"))
        }
    }

    #[test]
    fn test_sink_errors_are_counted() {
        let mut tracer = Tracer::with_sink(Config::default(), Box::new(FailingSink));
        tracer.print_message("lost", None);
        assert_eq!(tracer.dropped_lines(), 3);
    }

    #[test]
    fn test_color_is_never_written_to_memory() {
        let (mut tracer, sink) = tracer();
        tracer.configure(|config| config.color = ColorMode::Always).unwrap();
        tracer.enter("a", None);
        assert!(sink.lines().iter().all(|line| !line.contains('\u{1b}')));
    }
}
