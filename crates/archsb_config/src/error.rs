//! Errors from reading `archsb.toml`.

/// Why a configuration could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid TOML or does not match the expected schema.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A path setting is present but empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A value is out of range.
    #[error("validation error: {0}")]
    ValidationError(String),
}
