//! One architecture file and its line index.

use crate::file_id::FileId;
use std::path::PathBuf;

/// The text of an architecture file plus the byte offset of every line start.
pub struct SourceFile {
    /// Handle of this file in its database.
    pub id: FileId,
    /// Path on disk, or a synthetic name for in-memory text.
    pub path: PathBuf,
    /// Full file text.
    pub content: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Wraps `content` and indexes its lines.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                content
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| (i + 1) as u32),
            )
            .collect();
        Self {
            id,
            path,
            content,
            line_starts,
        }
    }

    /// Converts a byte offset to 1-based `(line, column)`.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        (idx as u32 + 1, offset - self.line_starts[idx] + 1)
    }

    /// Returns the full text of the line containing `offset`, without its newline.
    pub fn line_text(&self, offset: u32) -> &str {
        let (line, _) = self.line_col(offset);
        let start = self.line_starts[line as usize - 1] as usize;
        let end = self
            .line_starts
            .get(line as usize)
            .map_or(self.content.len(), |&next| next as usize - 1);
        self.content[start..end].trim_end_matches('\r')
    }

    /// Returns the text between two byte offsets.
    pub fn snippet(&self, start: u32, end: u32) -> Option<&str> {
        self.content.get(start as usize..end as usize)
    }
}
