//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ArchsbConfig;
use std::path::Path;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "archsb.toml";

/// Loads and validates `<dir>/archsb.toml`.
pub fn load_config(dir: &Path) -> Result<ArchsbConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE_NAME))
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<ArchsbConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ArchsbConfig, ConfigError> {
    let config: ArchsbConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ArchsbConfig) -> Result<(), ConfigError> {
    if let Some(file) = &config.architecture.file {
        if file.trim().is_empty() {
            return Err(ConfigError::MissingField("architecture.file".to_string()));
        }
    }
    for &width in &config.check.channel_widths {
        if !(1..=i64::from(i32::MAX)).contains(&width) {
            return Err(ConfigError::ValidationError(format!(
                "check.channel_widths: {width} is not a valid channel width"
            )));
        }
    }
    Ok(())
}
