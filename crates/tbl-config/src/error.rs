//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// A monitor config file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A monitor config file is not valid TOML for the expected shape.
    #[error("Failed to decode config file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// An expanded config could not be encoded back to TOML.
    #[error("Failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
}

