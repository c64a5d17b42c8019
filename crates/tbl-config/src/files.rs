//! Monitor config files.
//!
//! The concrete config (`~/.tblmonit.toml` by default) and flex configs are
//! plain TOML decoded straight into the `tbl-core` types. They are separate
//! from the layered application settings in [`crate::TblConfig`].

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tbl_core::{Config, FlexConfig};

use crate::error::ConfigError;

/// File name of the default monitor config in the home directory.
pub const DEFAULT_MONITOR_FILE: &str = ".tblmonit.toml";

/// `$HOME/.tblmonit.toml`, if a home directory is known.
#[must_use]
pub fn default_monitor_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_MONITOR_FILE))
}

/// Load a concrete monitor config.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] or [`ConfigError::Decode`] with the path.
pub fn load_monitor_config(path: &Path) -> Result<Config, ConfigError> {
    load_toml(path)
}

/// Load a pattern-based flex config.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] or [`ConfigError::Decode`] with the path.
pub fn load_flex_config(path: &Path) -> Result<FlexConfig, ConfigError> {
    load_toml(path)
}

/// Encode a concrete config as TOML, the format `load_monitor_config` reads.
///
/// # Errors
///
/// Returns [`ConfigError::Encode`] if serialization fails.
pub fn encode_monitor_config(config: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string(config)?)
}

fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
