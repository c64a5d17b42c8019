//! Integration tests for settings loading.
//!
//! Uses `figment::Jail` for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use tbl_config::TblConfig;

#[test]
fn loads_general_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
timezone = "Asia/Tokyo"
strict_lookups = true
detail = true
"#,
        )?;

        let config: TblConfig = Figment::from(Serialized::defaults(TblConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.timezone, "Asia/Tokyo");
        assert!(config.general.strict_lookups);
        assert!(config.general.detail);
        assert_eq!(config.general.zone().unwrap(), chrono_tz::Tz::Asia__Tokyo);
        Ok(())
    });
}

#[test]
fn loads_bigquery_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[bigquery]
endpoint = "http://localhost:9050/bigquery/v2"
access_token = "ya29.test"
timeout_secs = 5
page_size = 50
"#,
        )?;

        let config: TblConfig = Figment::from(Serialized::defaults(TblConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.bigquery.endpoint, "http://localhost:9050/bigquery/v2");
        assert_eq!(config.bigquery.access_token, "ya29.test");
        assert_eq!(config.bigquery.timeout_secs, 5);
        assert_eq!(config.bigquery.page_size, 50);
        assert!(config.bigquery.is_configured());
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tblmonit")?;
        jail.create_file(
            ".tblmonit/config.toml",
            r#"
[general]
timezone = "Europe/Berlin"
"#,
        )?;

        let config: TblConfig = TblConfig::figment().extract()?;
        assert_eq!(config.general.timezone, "Europe/Berlin");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
timezone = "Asia/Tokyo"
"#,
        )?;
        jail.set_env("TBLMONIT_GENERAL__TIMEZONE", "America/New_York");
        jail.set_env("TBLMONIT_BIGQUERY__ACCESS_TOKEN", "from-env");

        let config: TblConfig = Figment::from(Serialized::defaults(TblConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("TBLMONIT_").split("__"))
            .extract()?;

        assert_eq!(config.general.timezone, "America/New_York");
        assert_eq!(config.bigquery.access_token, "from-env");
        Ok(())
    });
}

#[test]
fn load_reads_process_env() {
    Jail::expect_with(|jail| {
        jail.set_env("TBLMONIT_GENERAL__STRICT_LOOKUPS", "true");
        jail.set_env(
            "TBLMONIT_BIGQUERY__ACCESS_TOKEN_COMMAND",
            "gcloud auth application-default print-access-token",
        );
        let config = TblConfig::load().expect("config loads");
        assert!(config.general.strict_lookups);
        assert!(config.bigquery.access_token.is_empty());
        assert!(config.bigquery.is_configured());
        Ok(())
    });
}
