//! Freshness evaluation.
//!
//! For every concrete table the evaluator resolves the physical table for
//! "today", reads its metadata from the catalog, and applies the configured
//! thresholds. Stale tables are returned with their reasons in evaluation
//! order (time-of-day reason before duration reason).

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tbl_catalog::{Catalog, CatalogSession, TableMetadata};
use tbl_core::duration::format_duration;
use tbl_core::{
    ClockTime, Config, DurationThreshold, FreshnessResult, Project, TableConfig,
    resolve_identifier,
};

use crate::error::EngineError;

/// Reason recorded for a table that is absent from the catalog.
pub const MISSING_TABLE_REASON: &str = "Table doesn't exist";

/// Evaluates concrete configs against a catalog in a fixed time zone.
#[derive(Debug, Clone)]
pub struct FreshnessChecker<C> {
    catalog: C,
    zone: Tz,
    strict_lookups: bool,
}

impl<C: Catalog> FreshnessChecker<C> {
    pub const fn new(catalog: C, zone: Tz) -> Self {
        Self {
            catalog,
            zone,
            strict_lookups: false,
        }
    }

    /// Abort on lookup failures instead of treating them as missing tables.
    #[must_use]
    pub const fn strict_lookups(mut self, strict: bool) -> Self {
        self.strict_lookups = strict;
        self
    }

    pub const fn zone(&self) -> Tz {
        self.zone
    }

    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Evaluate every table of `config` at instant `now`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Connect`] if a project session cannot be opened,
    /// or [`EngineError::Lookup`] for a failed lookup when strict lookups are
    /// enabled.
    pub async fn check(
        &self,
        config: &Config,
        now: DateTime<Utc>,
    ) -> Result<Vec<FreshnessResult>, EngineError> {
        let mut stale = Vec::new();
        for project in &config.projects {
            stale.extend(self.check_project(project, now).await?);
        }
        Ok(stale)
    }

    /// Evaluate one project's tables in a single catalog session.
    ///
    /// # Errors
    ///
    /// Same as [`FreshnessChecker::check`].
    pub async fn check_project(
        &self,
        project: &Project,
        now: DateTime<Utc>,
    ) -> Result<Vec<FreshnessResult>, EngineError> {
        let session = self
            .catalog
            .connect(&project.id)
            .await
            .map_err(|source| EngineError::Connect {
                project: project.id.clone(),
                source,
            })?;

        let mut stale = Vec::new();
        for dataset in &project.datasets {
            for table_config in &dataset.table_configs {
                if !table_config.has_threshold() {
                    tracing::debug!(
                        project = %project.id,
                        dataset = %dataset.id,
                        table = %table_config.table,
                        "no threshold set, skipping"
                    );
                    continue;
                }
                let table_id = resolve_identifier(
                    &table_config.table,
                    &table_config.date_for_shards,
                    now,
                    &self.zone,
                );
                if !table_config.date_for_shards.is_recognized() {
                    tracing::warn!(
                        project = %project.id,
                        dataset = %dataset.id,
                        table = %table_config.table,
                        policy = %table_config.date_for_shards,
                        "unrecognized DateForShards, treating table as unsharded"
                    );
                }

                let metadata = self.lookup(&session, &dataset.id, &table_id).await?;
                let identity = metadata.as_ref().map_or_else(
                    || format!("{}.{}.{table_id}", project.id, dataset.id),
                    |m| m.full_id.clone(),
                );

                let reasons = evaluate(table_config, metadata.as_ref(), now, &self.zone);
                if !reasons.is_empty() {
                    stale.push(FreshnessResult {
                        table: identity,
                        reasons,
                    });
                }
            }
        }
        Ok(stale)
    }

    async fn lookup(
        &self,
        session: &C::Session,
        dataset_id: &str,
        table_id: &str,
    ) -> Result<Option<TableMetadata>, EngineError> {
        match session.table_metadata(dataset_id, table_id).await {
            Ok(metadata) => Ok(metadata),
            Err(source) if self.strict_lookups => Err(EngineError::Lookup {
                table: format!("{}.{dataset_id}.{table_id}", session.project_id()),
                source,
            }),
            Err(err) => {
                tracing::warn!(
                    project = session.project_id(),
                    dataset = dataset_id,
                    table = table_id,
                    error = %err,
                    "failed to fetch metadata, treating table as missing"
                );
                Ok(None)
            }
        }
    }
}

/// Reasons `table_config` is stale at `now`, given the catalog's answer.
///
/// An empty vector means fresh. An entry without thresholds is never stale,
/// even when its table is missing. A missing table with a time threshold is
/// only flagged once `now` is past today's cutoff.
#[must_use]
pub fn evaluate(
    table_config: &TableConfig,
    metadata: Option<&TableMetadata>,
    now: DateTime<Utc>,
    zone: &Tz,
) -> Vec<String> {
    if !table_config.has_threshold() {
        return Vec::new();
    }
    let Some(metadata) = metadata else {
        let due = table_config
            .time_threshold
            .is_none_or(|cutoff| now > cutoff.resolve_today(now, zone));
        return if due {
            vec![MISSING_TABLE_REASON.to_string()]
        } else {
            Vec::new()
        };
    };

    let mut reasons = Vec::new();
    if let Some(cutoff) = table_config.time_threshold
        && let Some(reason) = time_reason(cutoff, metadata.last_modified, now, zone)
    {
        reasons.push(reason);
    }
    if let Some(max_age) = table_config.duration_threshold
        && let Some(reason) = duration_reason(max_age, metadata.last_modified, now)
    {
        reasons.push(reason);
    }
    reasons
}

/// Fires when the table was modified after today's cutoff.
#[must_use]
pub fn time_reason(
    cutoff: ClockTime,
    last_modified: DateTime<Utc>,
    now: DateTime<Utc>,
    zone: &Tz,
) -> Option<String> {
    if last_modified <= cutoff.resolve_today(now, zone) {
        return None;
    }
    Some(format!(
        "The table should be created by {}, but last modified time is {}",
        cutoff.hh_mm(),
        last_modified.with_timezone(zone).format("%H:%M")
    ))
}

/// Fires when at least `max_age` has elapsed since the last modification.
#[must_use]
pub fn duration_reason(
    max_age: DurationThreshold,
    last_modified: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Option<String> {
    let elapsed = now - last_modified;
    if elapsed < max_age.delta() {
        return None;
    }
    Some(format!(
        "The table should be modified in {max_age}, but not modified in {}",
        format_duration(elapsed)
    ))
}
