//! Opaque handle for an architecture file registered in the [`SourceDb`](crate::SourceDb).

use serde::{Deserialize, Serialize};

/// Identifies one architecture file held by a [`SourceDb`](crate::SourceDb).
///
/// IDs are handed out densely in registration order, so the raw value doubles
/// as an index into the database.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// Placeholder for data that was not read from any file (built in code, tests).
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Wraps a raw index.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}
