use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use tbl_catalog::BigQueryCatalog;
use tbl_core::FreshnessResult;
use tbl_engine::FreshnessChecker;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FreshnessArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Exit status of `--fail-on-stale` runs that found stale tables.
const STALE_EXIT_CODE: u8 = 2;

/// Handle `tblmonit freshness`.
pub async fn handle(
    args: &FreshnessArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    let path = ctx.monitor_config_path()?;
    let config = tbl_config::load_monitor_config(path)?;
    let catalog = BigQueryCatalog::from_config(&ctx.settings.bigquery)
        .await
        .context("failed to set up the BigQuery catalog")?;
    let checker =
        FreshnessChecker::new(catalog, ctx.zone).strict_lookups(ctx.settings.general.strict_lookups);

    let table_count = config.table_count();
    tracing::debug!(path = %path.display(), tables = table_count, zone = %ctx.zone, "checking freshness");

    let progress = Progress::spinner(&format!("checking {table_count} tables"));
    let now = Utc::now();
    let total = config.projects.len();
    let mut stale = Vec::new();
    for (index, project) in config.projects.iter().enumerate() {
        progress.project(index, total, &project.id);
        match checker.check_project(project, now).await {
            Ok(found) => stale.extend(found),
            Err(error) => {
                progress.finish_err(&format!("freshness check failed in project {}", project.id));
                return Err(error).context("freshness check failed");
            }
        }
    }
    progress.finish_clear();

    if stale.is_empty() {
        tracing::info!(tables = table_count, "all tables are fresh");
    }

    let detail = args.detail || ctx.settings.general.detail;
    output(&stale, flags.format, &report_lines(&stale, detail))?;

    if args.fail_on_stale && !stale.is_empty() {
        return Ok(ExitCode::from(STALE_EXIT_CODE));
    }
    Ok(ExitCode::SUCCESS)
}

fn report_lines(stale: &[FreshnessResult], detail: bool) -> Vec<String> {
    stale.iter().map(|result| result.render(detail)).collect()
}
