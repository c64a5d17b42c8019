//! `BigQuery` catalog configuration.

use serde::{Deserialize, Serialize};

/// Default REST endpoint.
fn default_endpoint() -> String {
    String::from("https://bigquery.googleapis.com/bigquery/v2")
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

/// Default page size for dataset and table listings.
const fn default_page_size() -> u32 {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BigQueryConfig {
    /// REST API base URL, without a trailing slash.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Static OAuth 2.0 bearer token. Expires, so only suited to short runs.
    #[serde(default)]
    pub access_token: String,

    /// Command printing a fresh bearer token on stdout, run once per
    /// invocation when `access_token` is empty
    /// (e.g. `gcloud auth application-default print-access-token`).
    #[serde(default)]
    pub access_token_command: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `maxResults` for list calls.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for BigQueryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            access_token: String::new(),
            access_token_command: String::new(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

impl BigQueryConfig {
    /// Check if the config has a token source.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.access_token.is_empty() || !self.access_token_command.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = BigQueryConfig::default();
        assert!(!config.is_configured());
        assert_eq!(
            config.endpoint,
            "https://bigquery.googleapis.com/bigquery/v2"
        );
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.page_size, 1000);
    }

    #[test]
    fn configured_when_token_set() {
        let config = BigQueryConfig {
            access_token: "ya29.token".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn configured_when_token_command_set() {
        let config = BigQueryConfig {
            access_token_command: "gcloud auth application-default print-access-token".into(),
            ..Default::default()
        };
        assert!(config.is_configured());

        let blank = BigQueryConfig {
            access_token_command: "   ".into(),
            ..Default::default()
        };
        assert!(!blank.is_configured());
    }
}
