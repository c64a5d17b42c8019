//! Flex config expansion.
//!
//! Turns a [`FlexConfig`] into a concrete [`Config`] by matching dataset and
//! table patterns against the catalog. Sharded families (`events_20200101`,
//! `events_20200102`, ...) collapse to a single entry per logical prefix.
//! Explicit entries are appended after the pattern-derived ones, without
//! de-duplication across the two.

use std::collections::HashSet;

use regex::Regex;
use tbl_catalog::{Catalog, CatalogSession};
use tbl_core::{
    Config, Dataset, FlexConfig, FlexDataset, FlexProject, FlexTableConfig, Project, TableConfig,
    logical_prefix,
};

use crate::error::EngineError;

/// Expand every project of `flex` against `catalog`.
///
/// Projects are processed in declaration order, one catalog session at a
/// time. The first failure aborts the run and no partial config is returned.
///
/// # Errors
///
/// Returns [`EngineError`] if a session cannot be opened, an enumeration
/// fails, a pattern is not a valid regex, or a table pattern has no threshold.
pub async fn expand<C: Catalog>(flex: &FlexConfig, catalog: &C) -> Result<Config, EngineError> {
    let mut projects = Vec::with_capacity(flex.projects.len());
    for flex_project in &flex.projects {
        projects.push(expand_project(flex_project, catalog).await?);
    }
    Ok(Config { projects })
}

async fn expand_project<C: Catalog>(
    flex_project: &FlexProject,
    catalog: &C,
) -> Result<Project, EngineError> {
    let session = catalog
        .connect(&flex_project.id)
        .await
        .map_err(|source| EngineError::Connect {
            project: flex_project.id.clone(),
            source,
        })?;

    let mut datasets = Vec::new();
    for flex_dataset in &flex_project.flex_datasets {
        let pattern = compile(&flex_dataset.id)?;
        let dataset_ids = session
            .list_datasets()
            .await
            .map_err(|source| EngineError::ListDatasets {
                project: flex_project.id.clone(),
                source,
            })?;

        let matched: Vec<&String> = dataset_ids
            .iter()
            .filter(|id| pattern.is_match(id))
            .collect();
        tracing::info!(
            project = %flex_project.id,
            pattern = %flex_dataset.id,
            matched = matched.len(),
            "matched datasets"
        );

        for dataset_id in matched {
            datasets.push(expand_dataset(&session, dataset_id, flex_dataset).await?);
        }
    }

    datasets.extend(flex_project.datasets.iter().cloned());
    Ok(Project {
        id: flex_project.id.clone(),
        datasets,
    })
}

async fn expand_dataset<S: CatalogSession>(
    session: &S,
    dataset_id: &str,
    flex_dataset: &FlexDataset,
) -> Result<Dataset, EngineError> {
    let mut table_configs = Vec::new();
    for flex_table in &flex_dataset.flex_table_configs {
        if !flex_table.is_valid() {
            return Err(EngineError::MissingThreshold {
                project: session.project_id().to_string(),
                dataset: dataset_id.to_string(),
                pattern: flex_table.table.clone(),
            });
        }

        let pattern = compile(&flex_table.table)?;
        let table_ids =
            session
                .list_tables(dataset_id)
                .await
                .map_err(|source| EngineError::ListTables {
                    project: session.project_id().to_string(),
                    dataset: dataset_id.to_string(),
                    source,
                })?;

        let collapsed = collapse_shard_families(
            table_ids
                .iter()
                .map(String::as_str)
                .filter(|id| pattern.is_match(id)),
            flex_table,
        );
        tracing::info!(
            project = session.project_id(),
            dataset = dataset_id,
            pattern = %flex_table.table,
            tables = collapsed.len(),
            "expanded table pattern"
        );
        table_configs.extend(collapsed);
    }

    table_configs.extend(flex_dataset.table_configs.iter().cloned());
    Ok(Dataset {
        id: dataset_id.to_string(),
        table_configs,
    })
}

/// Collapse matched table IDs into one [`TableConfig`] per logical prefix.
///
/// The first occurrence of a prefix wins and output keeps the order of first
/// occurrence. A table whose prefix is its own ID is treated as unsharded.
pub fn collapse_shard_families<'a>(
    table_ids: impl IntoIterator<Item = &'a str>,
    pattern: &FlexTableConfig,
) -> Vec<TableConfig> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for table_id in table_ids {
        let prefix = logical_prefix(table_id);
        if !seen.insert(prefix) {
            continue;
        }
        let sharded = prefix != table_id;
        if sharded {
            tracing::debug!(table = table_id, prefix, "collapsed shard family");
        }
        out.push(pattern.table_config_for(prefix, sharded));
    }
    out
}

fn compile(pattern: &str) -> Result<Regex, EngineError> {
    Regex::new(pattern).map_err(|source| EngineError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tbl_core::ShardPolicy;

    use super::*;

    fn pattern(policy: ShardPolicy) -> FlexTableConfig {
        FlexTableConfig {
            table: ".*".into(),
            date_for_shards: policy,
            time_threshold: None,
            duration_threshold: Some("24h".parse().unwrap()),
        }
    }

    #[test]
    fn shard_family_collapses_to_one_entry() {
        let out = collapse_shard_families(
            ["t_20200101", "t_20200102", "t_20200103"],
            &pattern(ShardPolicy::Today),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].table, "t_");
        assert_eq!(out[0].date_for_shards, ShardPolicy::Today);
    }

    #[test]
    fn unsharded_tables_drop_policy_and_keep_order() {
        let out = collapse_shard_families(
            ["users", "events_20200101", "orders", "events_20200102"],
            &pattern(ShardPolicy::OneDayAgo),
        );
        let tables: Vec<_> = out.iter().map(|tc| tc.table.as_str()).collect();
        assert_eq!(tables, vec!["users", "events_", "orders"]);
        assert_eq!(out[0].date_for_shards, ShardPolicy::None);
        assert_eq!(out[1].date_for_shards, ShardPolicy::OneDayAgo);
        assert!(out.iter().all(|tc| tc.duration_threshold.is_some()));
    }

    #[test]
    fn short_numeric_suffix_is_not_a_shard() {
        let out = collapse_shard_families(["v2024", "v2025"], &pattern(ShardPolicy::Today));
        let tables: Vec<_> = out.iter().map(|tc| tc.table.as_str()).collect();
        assert_eq!(tables, vec!["v2024", "v2025"]);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = compile("events_(").unwrap_err();
        assert!(matches!(err, EngineError::InvalidPattern { ref pattern, .. } if pattern == "events_("));
    }
}
