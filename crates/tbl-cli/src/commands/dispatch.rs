use std::process::ExitCode;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Freshness(args) => commands::freshness::handle(&args, ctx, flags).await,
        Commands::Config { action } => commands::config::handle(&action, ctx, flags).await,
    }
}
