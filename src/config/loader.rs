//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::WatchConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Errors that stop the monitor before its first poll.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file or prompt could not be read.
    #[error("IO error: {0}")]
    Io(std::io::Error),

    /// Config file is not valid TOML for the schema.
    #[error("Parse error: {0}")]
    Parse(toml::de::Error),

    /// Merged configuration failed semantic checks.
    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a TOML file without validating it.
///
/// Flight and secrets may still arrive from flags, environment, or prompts,
/// so validation runs later on the merged result via [`finalize`].
pub fn read_config(path: &Path) -> Result<WatchConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<WatchConfig, ConfigError> {
    finalize(read_config(path)?)
}

/// Validate a merged configuration, handing it back on success.
pub fn finalize(config: WatchConfig) -> Result<WatchConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
