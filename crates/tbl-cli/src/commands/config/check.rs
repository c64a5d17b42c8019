use std::path::Path;
use std::process::ExitCode;

use tbl_engine::{Finding, check_config, check_flex_config};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tblmonit config check`. Fails when any finding is an error.
pub fn handle(
    file: Option<&Path>,
    flex: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    let path = match file {
        Some(path) => path,
        None => ctx.monitor_config_path()?,
    };

    let findings = if flex {
        check_flex_config(&tbl_config::load_flex_config(path)?)
    } else {
        check_config(&tbl_config::load_monitor_config(path)?)
    };
    tracing::debug!(path = %path.display(), findings = findings.len(), "checked config");

    output(&findings, flags.format, &report_lines(path, &findings))?;

    if findings.iter().any(Finding::is_error) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn report_lines(path: &Path, findings: &[Finding]) -> Vec<String> {
    if findings.is_empty() {
        return vec![format!("{}: ok", path.display())];
    }
    findings
        .iter()
        .map(|finding| {
            let level = if finding.is_error() { "error" } else { "warning" };
            format!("{level}: {}: {}", finding.location, finding.message)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tbl_core::{Config, Dataset, Project, TableConfig};

    use super::*;

    #[test]
    fn clean_file_reports_ok() {
        assert_eq!(
            report_lines(Path::new("monitor.toml"), &[]),
            vec!["monitor.toml: ok"]
        );
    }

    #[test]
    fn findings_are_prefixed_with_level() {
        let config = Config {
            projects: vec![Project {
                id: "p".into(),
                datasets: vec![Dataset {
                    id: "d".into(),
                    table_configs: vec![TableConfig {
                        table: "t".into(),
                        ..Default::default()
                    }],
                }],
            }],
        };
        let lines = report_lines(Path::new("monitor.toml"), &check_config(&config));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("warning: p.d.t: "));
    }
}
