use std::path::PathBuf;

use clap::Subcommand;

/// Monitor config file tooling.
#[derive(Clone, Debug, Subcommand)]
pub enum ConfigCommands {
    /// Expand a flex config against the catalog and print the concrete config.
    Expand {
        /// Flex config file (TOML).
        file: PathBuf,
    },
    /// Check a config file for problems without contacting the catalog.
    Check {
        /// Config file to check (defaults to --config).
        file: Option<PathBuf>,
        /// Treat the file as a flex config.
        #[arg(long)]
        flex: bool,
    },
    /// Print the JSON Schema of the config file format.
    Schema {
        /// Describe the flex format instead of the concrete one.
        #[arg(long)]
        flex: bool,
    },
}
