//! Terminal preferences, decided once at startup.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

/// Narrowest `COLUMNS` value honored for table layout.
const MIN_TABLE_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    /// Colorize stale/error cells in table output.
    pub table_color: bool,
    /// Draw the catalog spinner on stderr.
    pub progress: bool,
    pub term_width: Option<usize>,
}

/// What the process can see of its environment.
#[derive(Clone, Copy, Debug, Default)]
struct Terminal<'a> {
    stdout_tty: bool,
    stderr_tty: bool,
    no_color: bool,
    columns: Option<&'a str>,
}

impl UiPrefs {
    fn detect(flags: &GlobalFlags, term: Terminal<'_>) -> Self {
        let table_color = term.stdout_tty
            && flags.format == OutputFormat::Table
            && !flags.quiet
            && !term.no_color;

        // A cron run has no stderr tty, and JSON consumers want clean streams.
        let progress = term.stderr_tty && !flags.quiet && flags.format != OutputFormat::Json;

        let term_width = term
            .columns
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|width| *width >= MIN_TABLE_WIDTH);

        Self {
            table_color,
            progress,
            term_width,
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let columns = std::env::var("COLUMNS").ok();
    let term = Terminal {
        stdout_tty: std::io::stdout().is_terminal(),
        stderr_tty: std::io::stderr().is_terminal(),
        no_color: std::env::var_os("NO_COLOR").is_some(),
        columns: columns.as_deref(),
    };
    let _ = UI_PREFS.set(UiPrefs::detect(flags, term));
}

/// Preferences set by [`init`]; everything off before that.
#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn flags(format: OutputFormat, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            config: None,
            timezone: None,
            format,
            quiet,
        }
    }

    const TTY: Terminal<'static> = Terminal {
        stdout_tty: true,
        stderr_tty: true,
        no_color: false,
        columns: Some("120"),
    };

    #[test]
    fn interactive_table_run_gets_everything() {
        assert_eq!(
            UiPrefs::detect(&flags(OutputFormat::Table, false), TTY),
            UiPrefs {
                table_color: true,
                progress: true,
                term_width: Some(120),
            }
        );
    }

    #[test]
    fn cron_run_is_plain() {
        let prefs = UiPrefs::detect(&flags(OutputFormat::Text, false), Terminal::default());
        assert_eq!(prefs, UiPrefs::default());
    }

    #[test]
    fn json_and_quiet_suppress_the_spinner() {
        assert!(!UiPrefs::detect(&flags(OutputFormat::Json, false), TTY).progress);
        assert!(!UiPrefs::detect(&flags(OutputFormat::Text, true), TTY).progress);
    }

    #[test]
    fn no_color_and_narrow_columns_are_honored() {
        let term = Terminal {
            no_color: true,
            columns: Some("20"),
            ..TTY
        };
        let prefs = UiPrefs::detect(&flags(OutputFormat::Table, false), term);
        assert!(!prefs.table_color);
        assert_eq!(prefs.term_width, None);
    }
}
