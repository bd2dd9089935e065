//! Parsing and validation of `archsb.toml` configuration files.
//!
//! The configuration names a default architecture file, the channel widths at
//! which permutation functions are probed, and how reports are printed. Every
//! section is optional.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
