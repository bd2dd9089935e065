//! Architecture file bookkeeping for source-located error reporting.
//!
//! Every architecture description read by the toolchain is registered in a
//! [`SourceDb`] and receives a [`FileId`]. Elements parsed out of it remember
//! the byte [`Span`] of their start tag, which the database later turns into a
//! human-readable [`Location`] (`file:line:col`).

#![warn(missing_docs)]

pub mod file_id;
pub mod location;
pub mod source_db;
pub mod source_file;
pub mod span;

pub use file_id::FileId;
pub use location::Location;
pub use source_db::SourceDb;
pub use source_file::SourceFile;
pub use span::Span;
