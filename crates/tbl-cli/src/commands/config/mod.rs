use std::process::ExitCode;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ConfigCommands;
use crate::context::AppContext;

pub mod check;
pub mod expand;
pub mod schema;

/// Handle `tblmonit config <subcommand>`.
pub async fn handle(
    action: &ConfigCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    match action {
        ConfigCommands::Expand { file } => expand::handle(file, ctx, flags).await,
        ConfigCommands::Check { file, flex } => check::handle(file.as_deref(), *flex, ctx, flags),
        ConfigCommands::Schema { flex } => schema::handle(*flex),
    }
}
