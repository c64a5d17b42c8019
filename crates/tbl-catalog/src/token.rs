//! Access token sources for the BigQuery catalog.

use std::time::Duration;

use tbl_config::BigQueryConfig;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::CatalogError;

/// Resolve the bearer token for this run.
///
/// A static `access_token` wins. Otherwise `access_token_command` is split on
/// whitespace, run without a shell, and its trimmed stdout is the token.
///
/// # Errors
///
/// Returns [`CatalogError::NotConfigured`] if neither source is set, or
/// [`CatalogError::TokenCommand`] if the command cannot be run, times out,
/// exits non-zero, or prints nothing.
pub async fn resolve_access_token(config: &BigQueryConfig) -> Result<String, CatalogError> {
    if !config.access_token.is_empty() {
        return Ok(config.access_token.clone());
    }

    let command = config.access_token_command.trim();
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(CatalogError::NotConfigured(String::from(
            "set TBLMONIT_BIGQUERY__ACCESS_TOKEN or TBLMONIT_BIGQUERY__ACCESS_TOKEN_COMMAND",
        )));
    };
    let failed = |reason: String| CatalogError::TokenCommand {
        command: command.to_string(),
        reason,
    };

    tracing::debug!(program, "running access token command");
    let output = timeout(
        Duration::from_secs(config.timeout_secs),
        Command::new(program).args(parts).kill_on_drop(true).output(),
    )
    .await
    .map_err(|_| failed(format!("timed out after {}s", config.timeout_secs)))?
    .map_err(|err| failed(err.to_string()))?;

    if !output.status.success() {
        return Err(failed(format!(
            "{}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(failed(String::from("printed no token")));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn with_command(command: &str) -> BigQueryConfig {
        BigQueryConfig {
            access_token_command: command.into(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn static_token_skips_the_command() {
        let config = BigQueryConfig {
            access_token: "ya29.static".into(),
            ..with_command("false")
        };
        assert_eq!(resolve_access_token(&config).await.unwrap(), "ya29.static");
    }

    #[tokio::test]
    async fn command_stdout_is_trimmed() {
        let token = resolve_access_token(&with_command("echo  ya29.fresh "))
            .await
            .unwrap();
        assert_eq!(token, "ya29.fresh");
    }

    #[tokio::test]
    async fn failing_command_is_reported() {
        let err = resolve_access_token(&with_command("false")).await.unwrap_err();
        assert!(matches!(err, CatalogError::TokenCommand { ref command, .. } if command == "false"));

        let err = resolve_access_token(&with_command("tblmonit-no-such-program"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::TokenCommand { .. }));
    }

    #[tokio::test]
    async fn empty_output_is_rejected() {
        let err = resolve_access_token(&with_command("true")).await.unwrap_err();
        assert!(matches!(err, CatalogError::TokenCommand { ref reason, .. } if reason == "printed no token"));
    }

    #[tokio::test]
    async fn no_source_is_not_configured() {
        let err = resolve_access_token(&BigQueryConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotConfigured(_)));
    }
}
