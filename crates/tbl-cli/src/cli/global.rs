use std::path::PathBuf;

use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Plain lines, one per result.
    Text,
    Json,
    Table,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub config: Option<PathBuf>,
    pub timezone: Option<String>,
    pub format: OutputFormat,
    pub quiet: bool,
}
