use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use tbl_catalog::BigQueryCatalog;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `tblmonit config expand`.
///
/// Text mode prints the concrete config as TOML, ready to be used as the
/// monitor config.
pub async fn handle(file: &Path, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<ExitCode> {
    let flex = tbl_config::load_flex_config(file)?;
    let catalog = BigQueryCatalog::from_config(&ctx.settings.bigquery)
        .await
        .context("failed to set up the BigQuery catalog")?;

    let progress = Progress::spinner(&format!("expanding {}", file.display()));
    let config = match tbl_engine::expand(&flex, &catalog).await {
        Ok(config) => {
            progress.finish_clear();
            config
        }
        Err(error) => {
            progress.finish_err("expansion failed");
            return Err(error).with_context(|| format!("failed to expand {}", file.display()));
        }
    };
    tracing::info!(tables = config.table_count(), "expanded flex config");

    if flags.format == OutputFormat::Text {
        print!("{}", tbl_config::encode_monitor_config(&config)?);
    } else {
        output(&config.projects, flags.format, &[])?;
    }
    Ok(ExitCode::SUCCESS)
}
