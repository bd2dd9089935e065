//! Registry of every architecture file read during a session.

use crate::file_id::FileId;
use crate::location::Location;
use crate::source_file::SourceFile;
use crate::span::Span;
use std::io;
use std::path::{Path, PathBuf};

/// Owns the text of loaded architecture files and resolves spans into them.
#[derive(Default)]
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `path` from disk and registers it.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Registers in-memory text under `name`.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// Returns the file for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Resolves the start of `span` to a file/line/column location.
    ///
    /// Returns `None` for [`Span::DUMMY`] and for spans of foreign databases.
    pub fn locate(&self, span: Span) -> Option<Location> {
        let file = self.files.get(span.file.as_raw() as usize)?;
        let (line, col) = file.line_col(span.start);
        Some(Location {
            file_path: file.path.clone(),
            line,
            col,
        })
    }

    /// Returns the text covered by `span`, or `None` if the span does not
    /// fall on character boundaries of a file in this database.
    pub fn snippet(&self, span: Span) -> Option<&str> {
        self.files
            .get(span.file.as_raw() as usize)?
            .snippet(span.start, span.end)
    }
}
