use clap::{Args, Subcommand};

use crate::cli::subcommands::ConfigCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Report tables that are stale right now.
    Freshness(FreshnessArgs),
    /// Expand, check, or describe monitor config files.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct FreshnessArgs {
    /// Print the reasons each table is stale.
    #[arg(short, long)]
    pub detail: bool,

    /// Exit with status 2 when any table is stale.
    #[arg(long)]
    pub fail_on_stale: bool,
}
