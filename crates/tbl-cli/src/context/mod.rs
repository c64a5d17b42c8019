use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono_tz::Tz;
use tbl_config::TblConfig;

use crate::cli::GlobalFlags;

mod config_warnings;

pub use config_warnings::warn_unconfigured;

/// Settings resolved once per invocation.
#[derive(Debug)]
pub struct AppContext {
    pub settings: TblConfig,
    /// `--timezone` if given, otherwise `general.timezone`.
    pub zone: Tz,
    monitor_config: Option<PathBuf>,
}

impl AppContext {
    pub fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let settings = TblConfig::load_with_dotenv().context("failed to load tblmonit settings")?;
        warn_unconfigured(&settings);

        let zone = match &flags.timezone {
            Some(name) => tbl_config::parse_zone(name)?,
            None => settings.general.zone()?,
        };
        tracing::debug!(%zone, "resolved evaluation time zone");

        let monitor_config = flags
            .config
            .clone()
            .or_else(tbl_config::default_monitor_config_path);

        Ok(Self {
            settings,
            zone,
            monitor_config,
        })
    }

    /// Path of the concrete monitor config.
    pub fn monitor_config_path(&self) -> anyhow::Result<&Path> {
        self.monitor_config
            .as_deref()
            .context("no monitor config given and the home directory is unknown; pass --config")
    }
}
