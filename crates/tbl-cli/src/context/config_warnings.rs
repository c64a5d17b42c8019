use tbl_config::{ENV_PREFIX, TblConfig};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &TblConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &TblConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.bigquery.is_configured() && has_env_prefix(&env_keys, "TBLMONIT_BIGQUERY") {
        warnings.push(
            "BigQuery config appears default while TBLMONIT_BIGQUERY* env vars exist. Use double underscores (example: TBLMONIT_BIGQUERY__ACCESS_TOKEN)."
                .to_string(),
        );
    }

    for key in &env_keys {
        let Some(rest) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        if rest != "LOG" && !rest.contains("__") && !rest.starts_with("BIGQUERY") {
            warnings.push(format!(
                "{key} is not a recognized setting. Use double underscores (example: TBLMONIT_GENERAL__TIMEZONE)."
            ));
        }
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.starts_with(&format!("{prefix}__")))
}
