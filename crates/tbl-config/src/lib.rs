//! # tbl-config
//!
//! Configuration for tblmonit.
//!
//! Two kinds of configuration live here:
//!
//! - **Application settings** ([`TblConfig`]), layered with figment. Sources in
//!   priority order, highest wins:
//!   1. Environment variables (`TBLMONIT_*` prefix, `__` as separator)
//!   2. Project-level `.tblmonit/config.toml`
//!   3. User-level `~/.config/tblmonit/config.toml`
//!   4. Built-in defaults
//! - **Monitor config files** ([`files`]): the concrete and flex table lists,
//!   decoded from TOML into `tbl-core` types.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TBLMONIT_GENERAL__TIMEZONE` -> `general.timezone`,
//! `TBLMONIT_BIGQUERY__ACCESS_TOKEN_COMMAND` -> `bigquery.access_token_command`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tbl_config::TblConfig;
//!
//! let config = TblConfig::load_with_dotenv().expect("config");
//! let zone = config.general.zone().expect("valid zone");
//! if config.bigquery.is_configured() {
//!     println!("querying {} in {zone}", config.bigquery.endpoint);
//! }
//! ```

mod bigquery;
mod error;
pub mod files;
mod general;

pub use bigquery::BigQueryConfig;
pub use error::ConfigError;
pub use files::{
    default_monitor_config_path, encode_monitor_config, load_flex_config, load_monitor_config,
};
pub use general::{GeneralConfig, parse_zone};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for settings overrides.
pub const ENV_PREFIX: &str = "TBLMONIT_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TblConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub bigquery: BigQueryConfig,
}

impl TblConfig {
    /// Load settings from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load settings after reading `.env` from the current directory, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source is malformed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".tblmonit/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global settings file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tblmonit").join("config.toml"))
    }
}
