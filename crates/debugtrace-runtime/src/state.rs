/// Code nesting counters shared by every scope of one tracer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NestingState {
    code_level: usize,
    previous_code_level: usize,
}

impl NestingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scopes currently entered.
    pub fn code_level(&self) -> usize {
        self.code_level
    }

    /// Code level recorded just before the latest enter or leave.
    pub fn previous_code_level(&self) -> usize {
        self.previous_code_level
    }

    /// True when the latest transition returned from a deeper level, so the
    /// next Enter starts a new block and is preceded by a blank line.
    pub fn returned_from_deeper(&self) -> bool {
        self.previous_code_level > self.code_level
    }

    pub fn enter(&mut self) {
        self.previous_code_level = self.code_level;
        self.code_level += 1;
    }

    /// Leaving at level zero keeps the level at zero.
    pub fn leave(&mut self) {
        self.previous_code_level = self.code_level;
        self.code_level = self.code_level.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
