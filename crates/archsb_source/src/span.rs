//! Byte ranges inside an architecture file.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` in one architecture file.
///
/// Parsed elements record the span of their opening tag (`<wireconn`,
/// `<func`, ...) so that errors can point at the element that caused them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// File the range belongs to.
    pub file: FileId,
    /// First byte (inclusive).
    pub start: u32,
    /// One past the last byte.
    pub end: u32,
}

impl Span {
    /// Span for values that have no source, e.g. a switchblock assembled in code.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a span over `start..end` in `file`.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Length in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` for a zero-length span.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if this span does not refer to a registered file.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::DUMMY
    }
}
