//! Offline config checks.
//!
//! Finds problems that can be detected without contacting the catalog. Errors
//! are problems that would abort an expansion; warnings are entries that load
//! but will not behave the way their author probably expects.

use regex::Regex;
use serde::Serialize;
use tbl_core::{Config, FlexConfig, TableConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// One problem found in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    /// Dotted path of the offending entry (`project.dataset.table`).
    pub location: String,
    pub message: String,
}

impl Finding {
    fn warning(location: String, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            location,
            message: message.into(),
        }
    }

    fn error(location: String, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            location,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Check a concrete monitor config.
#[must_use]
pub fn check_config(config: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();
    for project in &config.projects {
        if project.id.trim().is_empty() {
            findings.push(Finding::error(String::from("<project>"), "project ID is empty"));
        }
        for dataset in &project.datasets {
            let location = format!("{}.{}", project.id, dataset.id);
            check_table_configs(&location, &dataset.table_configs, &mut findings);
        }
    }
    findings
}

/// Check a flex config, including the concrete entries it carries.
#[must_use]
pub fn check_flex_config(flex: &FlexConfig) -> Vec<Finding> {
    let mut findings = Vec::new();
    for project in &flex.projects {
        if project.id.trim().is_empty() {
            findings.push(Finding::error(String::from("<project>"), "project ID is empty"));
        }

        for flex_dataset in &project.flex_datasets {
            let location = format!("{}.{}", project.id, flex_dataset.id);
            if let Err(err) = Regex::new(&flex_dataset.id) {
                findings.push(Finding::error(
                    location.clone(),
                    format!("invalid dataset pattern: {err}"),
                ));
            }

            for flex_table in &flex_dataset.flex_table_configs {
                let table_location = format!("{location}.{}", flex_table.table);
                if let Err(err) = Regex::new(&flex_table.table) {
                    findings.push(Finding::error(
                        table_location.clone(),
                        format!("invalid table pattern: {err}"),
                    ));
                }
                if !flex_table.is_valid() {
                    findings.push(Finding::error(
                        table_location.clone(),
                        "pattern sets neither TimeThreshold nor a non-zero DurationThreshold",
                    ));
                }
                if !flex_table.date_for_shards.is_recognized() {
                    findings.push(unrecognized_policy(
                        table_location,
                        flex_table.date_for_shards.as_str(),
                    ));
                }
            }

            check_table_configs(&location, &flex_dataset.table_configs, &mut findings);
        }

        for dataset in &project.datasets {
            let location = format!("{}.{}", project.id, dataset.id);
            check_table_configs(&location, &dataset.table_configs, &mut findings);
        }
    }
    findings
}

fn check_table_configs(location: &str, table_configs: &[TableConfig], findings: &mut Vec<Finding>) {
    for table_config in table_configs {
        let table_location = format!("{location}.{}", table_config.table);
        if table_config.table.is_empty() {
            findings.push(Finding::error(table_location.clone(), "table name is empty"));
        }
        if !table_config.has_threshold() {
            findings.push(Finding::warning(
                table_location.clone(),
                "no threshold set, the table is never evaluated",
            ));
        }
        if !table_config.date_for_shards.is_recognized() {
            findings.push(unrecognized_policy(
                table_location,
                table_config.date_for_shards.as_str(),
            ));
        }
    }
}

fn unrecognized_policy(location: String, raw: &str) -> Finding {
    Finding::warning(
        location,
        format!("unrecognized DateForShards '{raw}', the table is treated as unsharded"),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tbl_core::{Dataset, FlexDataset, FlexProject, FlexTableConfig, Project, ShardPolicy};

    use super::*;

    fn table(name: &str, policy: ShardPolicy, duration: Option<&str>) -> TableConfig {
        TableConfig {
            table: name.into(),
            date_for_shards: policy,
            time_threshold: None,
            duration_threshold: duration.map(|d| d.parse().unwrap()),
        }
    }

    #[test]
    fn clean_config_has_no_findings() {
        let config = Config {
            projects: vec![Project {
                id: "p".into(),
                datasets: vec![Dataset {
                    id: "d".into(),
                    table_configs: vec![table("events_", ShardPolicy::Today, Some("24h"))],
                }],
            }],
        };
        assert!(check_config(&config).is_empty());
    }

    #[test]
    fn concrete_warnings() {
        let config = Config {
            projects: vec![Project {
                id: "p".into(),
                datasets: vec![Dataset {
                    id: "d".into(),
                    table_configs: vec![
                        table("bare", ShardPolicy::None, None),
                        table("odd_", ShardPolicy::parse("EVERY_OTHER_DAY"), Some("1h")),
                    ],
                }],
            }],
        };
        let findings = check_config(&config);
        let summary: Vec<_> = findings
            .iter()
            .map(|f| (f.severity, f.location.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Severity::Warning, "p.d.bare"),
                (Severity::Warning, "p.d.odd_"),
            ]
        );
        assert_eq!(findings[0].message, "no threshold set, the table is never evaluated");
        assert!(findings[1].message.contains("EVERY_OTHER_DAY"));
    }

    #[test]
    fn flex_errors() {
        let flex = FlexConfig {
            projects: vec![FlexProject {
                id: "p".into(),
                datasets: vec![],
                flex_datasets: vec![FlexDataset {
                    id: "logs_(".into(),
                    table_configs: vec![],
                    flex_table_configs: vec![FlexTableConfig {
                        table: "events_.*".into(),
                        ..Default::default()
                    }],
                }],
            }],
        };
        let findings = check_flex_config(&flex);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(Finding::is_error));
        assert!(findings[0].message.starts_with("invalid dataset pattern"));
        assert_eq!(findings[1].location, "p.logs_(.events_.*");
    }
}
