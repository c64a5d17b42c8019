use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `tblmonit` binary.
#[derive(Debug, Parser)]
#[command(
    name = "tblmonit",
    version,
    about = "tblmonit - table freshness monitor"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Monitor config file (defaults to $HOME/.tblmonit.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// IANA time zone for shard dates and cutoffs (overrides general.timezone)
    #[arg(long, global = true)]
    pub timezone: Option<String>,

    /// Output format: text, json, table
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            config: self.config.clone(),
            timezone: self.timezone.clone(),
            format: self.format,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::subcommands::ConfigCommands;
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "tblmonit",
            "--config",
            "monitor.toml",
            "--timezone",
            "Asia/Tokyo",
            "--format",
            "json",
            "freshness",
            "--detail",
        ])
        .expect("cli should parse");

        assert_eq!(cli.config.as_deref(), Some(Path::new("monitor.toml")));
        assert_eq!(cli.timezone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Freshness(ref args) if args.detail));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["tblmonit", "freshness", "--fail-on-stale", "-q"])
            .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(
            matches!(cli.command, Commands::Freshness(ref args) if args.fail_on_stale && !args.detail)
        );
    }

    #[test]
    fn config_subcommands_parse() {
        let cli = Cli::try_parse_from(["tblmonit", "config", "expand", "flex.toml"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Config { action: ConfigCommands::Expand { ref file } } if file == Path::new("flex.toml")
        ));

        let cli = Cli::try_parse_from(["tblmonit", "config", "check", "--flex"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Config { action: ConfigCommands::Check { file: None, flex: true } }
        ));

        let cli = Cli::try_parse_from(["tblmonit", "config", "schema"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Config { action: ConfigCommands::Schema { flex: false } }
        ));
    }

    #[test]
    fn expand_requires_a_file() {
        assert!(Cli::try_parse_from(["tblmonit", "config", "expand"]).is_err());
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["tblmonit", "--format", "xml", "freshness"]);
        assert!(parsed.is_err());
    }
}
