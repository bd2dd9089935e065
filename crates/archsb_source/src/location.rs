//! File/line/column coordinates shown to the architecture author.

use std::fmt;
use std::path::PathBuf;

/// A span start resolved to 1-based line and column numbers.
///
/// Produced by [`SourceDb::locate`](crate::SourceDb::locate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path of the architecture file (or the name given to an in-memory source).
    pub file_path: PathBuf,
    /// Line number, starting at 1.
    pub line: u32,
    /// Column number in bytes, starting at 1.
    pub col: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path.display(), self.line, self.col)
    }
}
