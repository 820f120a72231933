use crate::Result;
use crate::config::SinkTarget;
use is_terminal::IsTerminal;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// Destination for finished trace lines. Each call writes one line and flushes it.
pub trait Sink: Send {
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    fn is_terminal(&self) -> bool {
        false
    }

    /// Whether ANSI colour codes may be written to this sink at all.
    fn accepts_color(&self) -> bool {
        true
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}", line)?;
        stderr.flush()
    }

    fn is_terminal(&self) -> bool {
        io::stderr().is_terminal()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        stdout.flush()
    }

    fn is_terminal(&self) -> bool {
        io::stdout().is_terminal()
    }
}

#[derive(Debug)]
pub struct FileSink {
    file: File,
}

impl FileSink {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl Sink for FileSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.file, "{}", line)?;
        self.file.flush()
    }
}

/// In-memory sink. Clones share the same buffer, so a host can keep one
/// handle and give the other to the tracer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.buffer().clone()
    }

    /// Return the captured lines and clear the buffer.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.buffer())
    }

    pub fn clear(&self) {
        self.buffer().clear();
    }

    fn buffer(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.buffer().push(line.to_string());
        Ok(())
    }

    fn accepts_color(&self) -> bool {
        false
    }
}

/// Open the sink a configuration points at.
pub fn open_sink(target: &SinkTarget) -> Result<Box<dyn Sink>> {
    Ok(match target {
        SinkTarget::Stderr => Box::new(StderrSink),
        SinkTarget::Stdout => Box::new(StdoutSink),
        SinkTarget::File(path) => Box::new(FileSink::open(path)?),
    })
}
