//! Concrete monitor config.
//!
//! One [`TableConfig`] per logical monitored table. Keys keep the CamelCase
//! spelling of existing `.tblmonit.toml` files (`[[Project]]`, `ID`,
//! `TableConfig`, `DateForShards`, ...) so they load unchanged.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::shard::ShardPolicy;
use crate::threshold::{ClockTime, DurationThreshold};

/// Root of a concrete monitor config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    #[serde(rename = "Project", default)]
    pub projects: Vec<Project>,
}

impl Config {
    /// Total number of monitored tables across all projects.
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.projects
            .iter()
            .flat_map(|project| &project.datasets)
            .map(|dataset| dataset.table_configs.len())
            .sum()
    }
}

/// A catalog namespace (a BigQuery project).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Project {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Dataset", default)]
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Dataset {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "TableConfig", default)]
    pub table_configs: Vec<TableConfig>,
}

/// One logical monitored table: a plain table, or a daily-sharded family
/// identified by its prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableConfig {
    /// Table ID, or the shard prefix when `date_for_shards` is set.
    #[serde(rename = "Table")]
    pub table: String,

    #[serde(
        rename = "DateForShards",
        default,
        skip_serializing_if = "ShardPolicy::is_none"
    )]
    #[schemars(with = "String")]
    pub date_for_shards: ShardPolicy,

    /// Latest acceptable time of day for the last modification.
    #[serde(
        rename = "TimeThreshold",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<String>")]
    pub time_threshold: Option<ClockTime>,

    /// Maximum age since the last modification.
    #[serde(
        rename = "DurationThreshold",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<String>")]
    pub duration_threshold: Option<DurationThreshold>,
}

impl TableConfig {
    /// Whether at least one staleness predicate is configured.
    #[must_use]
    pub const fn has_threshold(&self) -> bool {
        self.time_threshold.is_some() || self.duration_threshold.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_threshold_requires_either_field() {
        let mut tc = TableConfig {
            table: "events".into(),
            ..Default::default()
        };
        assert!(!tc.has_threshold());

        tc.duration_threshold = Some("24h".parse().unwrap());
        assert!(tc.has_threshold());

        tc.duration_threshold = None;
        tc.time_threshold = Some("09:00:00".parse().unwrap());
        assert!(tc.has_threshold());
    }

    #[test]
    fn table_count_spans_projects() {
        let table = |name: &str| TableConfig {
            table: name.into(),
            ..Default::default()
        };
        let config = Config {
            projects: vec![
                Project {
                    id: "p1".into(),
                    datasets: vec![Dataset {
                        id: "d1".into(),
                        table_configs: vec![table("a"), table("b")],
                    }],
                },
                Project {
                    id: "p2".into(),
                    datasets: vec![Dataset {
                        id: "d2".into(),
                        table_configs: vec![table("c")],
                    }],
                },
            ],
        };
        assert_eq!(config.table_count(), 3);
    }
}
