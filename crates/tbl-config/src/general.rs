//! General application configuration.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default evaluation time zone.
fn default_timezone() -> String {
    String::from("UTC")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// IANA time zone used for shard dates and time-of-day thresholds.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Abort a freshness run when a metadata lookup fails for a reason other
    /// than "not found", instead of treating the table as missing.
    #[serde(default)]
    pub strict_lookups: bool,

    /// Print reasons next to each stale table by default.
    #[serde(default)]
    pub detail: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            strict_lookups: false,
            detail: false,
        }
    }
}

impl GeneralConfig {
    /// Parse the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `timezone` is not a known IANA name.
    pub fn zone(&self) -> Result<Tz, ConfigError> {
        parse_zone(&self.timezone)
    }
}

/// Parse an IANA time zone name.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for unknown names.
pub fn parse_zone(name: &str) -> Result<Tz, ConfigError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|reason| ConfigError::InvalidValue {
            field: String::from("general.timezone"),
            reason: reason.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.timezone, "UTC");
        assert!(!config.strict_lookups);
        assert!(!config.detail);
        assert_eq!(config.zone().unwrap(), Tz::UTC);
    }

    #[test]
    fn parses_iana_zone() {
        let config = GeneralConfig {
            timezone: "Asia/Tokyo".into(),
            ..Default::default()
        };
        assert_eq!(config.zone().unwrap(), Tz::Asia__Tokyo);
    }

    #[test]
    fn rejects_unknown_zone() {
        assert!(matches!(
            parse_zone("Mars/Olympus_Mons"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
