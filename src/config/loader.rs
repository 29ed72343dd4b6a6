use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::CompilerConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {source}")]
    ParseError {
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl CompilerConfig {
    /// Parses and validates configuration from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CompilerConfig =
            toml::from_str(content).map_err(|source| ConfigError::ParseError { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// - If the file doesn't exist, returns `CompilerConfig::default()`.
    /// - Otherwise reads, parses and validates it.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(CompilerConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&content)
    }

    /// Validates the configuration.
    ///
    /// The namespace prefix ends up as the first segment of every rewritten
    /// path selector, so it cannot contain the path separator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace_prefix.contains('.') {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "namespace_prefix '{}' must not contain '.'",
                    self.namespace_prefix
                ),
            });
        }
        Ok(())
    }
}
