//! Breakpoint identity and location types.

use std::fmt;

/// A 1-based line within a file, as reported by the debugger.
///
/// The file string is kept exactly as the debugger printed it, so lookups
/// against the host's open documents use the same spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    /// Path of the file containing the line.
    pub file: String,
    /// 1-based line number.
    pub line: u32,
}

impl Location {
    /// Builds a location from a file path and a 1-based line.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.file, self.line)
    }
}

/// A breakpoint the debugger has confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoint {
    /// Identifier assigned by the debugger.
    pub index: u32,
    /// Where the breakpoint is set.
    pub location: Location,
}

impl Breakpoint {
    /// Name of the host tag that shades this breakpoint's line.
    #[must_use]
    pub fn tag_name(&self) -> String {
        tag_name(self.index)
    }
}

/// Name of the host tag used for the breakpoint with `index`.
#[must_use]
pub fn tag_name(index: u32) -> String {
    format!("_breakpoint_{index}")
}
