/// Caller-supplied source position attached to a trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: Option<u32>,
}

impl SourceLocation {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self {
            file,
            line: Some(line),
        }
    }

    /// Location with the line number dropped (used for Leave lines).
    pub const fn file_only(self) -> Self {
        Self {
            file: self.file,
            line: None,
        }
    }
}

impl From<&'static std::panic::Location<'static>> for SourceLocation {
    fn from(location: &'static std::panic::Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}
