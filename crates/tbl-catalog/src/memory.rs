//! In-memory catalog.
//!
//! Holds a fixed set of projects, datasets and tables. Failures can be
//! injected per project, dataset or table so callers can exercise their
//! error paths. Session counters track how many sessions are open.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};

use crate::error::CatalogError;
use crate::{Catalog, CatalogSession, TableMetadata};

#[derive(Debug, Clone)]
struct MemoryTable {
    id: String,
    last_modified: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct MemoryDataset {
    id: String,
    tables: Vec<MemoryTable>,
}

#[derive(Debug, Clone)]
struct MemoryProject {
    id: String,
    datasets: Vec<MemoryDataset>,
}

#[derive(Debug, Clone, Default)]
struct Faults {
    unreachable: HashSet<String>,
    /// `(project, None)` fails dataset listing, `(project, Some(dataset))`
    /// fails table listing.
    listing: HashSet<(String, Option<String>)>,
    lookup: HashSet<(String, String, String)>,
}

#[derive(Debug, Default)]
struct Counters {
    open: AtomicUsize,
    opened: AtomicUsize,
}

/// Catalog backed by data held in memory. Entries keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    projects: Arc<Vec<MemoryProject>>,
    faults: Arc<Faults>,
    counters: Arc<Counters>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn project_mut(&mut self, project_id: &str) -> &mut MemoryProject {
        let projects = Arc::make_mut(&mut self.projects);
        let idx = match projects.iter().position(|p| p.id == project_id) {
            Some(idx) => idx,
            None => {
                projects.push(MemoryProject {
                    id: project_id.to_string(),
                    datasets: Vec::new(),
                });
                projects.len() - 1
            }
        };
        &mut projects[idx]
    }

    fn dataset_mut(&mut self, project_id: &str, dataset_id: &str) -> &mut MemoryDataset {
        let project = self.project_mut(project_id);
        let idx = match project.datasets.iter().position(|d| d.id == dataset_id) {
            Some(idx) => idx,
            None => {
                project.datasets.push(MemoryDataset {
                    id: dataset_id.to_string(),
                    tables: Vec::new(),
                });
                project.datasets.len() - 1
            }
        };
        &mut project.datasets[idx]
    }

    fn faults_mut(&mut self) -> &mut Faults {
        Arc::make_mut(&mut self.faults)
    }

    /// Add an empty dataset (creating the project if needed).
    #[must_use]
    pub fn with_dataset(mut self, project_id: &str, dataset_id: &str) -> Self {
        self.dataset_mut(project_id, dataset_id);
        self
    }

    /// Add or replace a table.
    #[must_use]
    pub fn with_table(
        mut self,
        project_id: &str,
        dataset_id: &str,
        table_id: &str,
        last_modified: DateTime<Utc>,
    ) -> Self {
        let dataset = self.dataset_mut(project_id, dataset_id);
        match dataset.tables.iter_mut().find(|t| t.id == table_id) {
            Some(table) => table.last_modified = last_modified,
            None => dataset.tables.push(MemoryTable {
                id: table_id.to_string(),
                last_modified,
            }),
        }
        self
    }

    /// Make `connect` fail for `project_id`.
    #[must_use]
    pub fn with_unreachable_project(mut self, project_id: &str) -> Self {
        self.faults_mut().unreachable.insert(project_id.to_string());
        self
    }

    /// Make dataset listing (`dataset_id = None`) or table listing fail.
    #[must_use]
    pub fn with_failing_listing(mut self, project_id: &str, dataset_id: Option<&str>) -> Self {
        self.faults_mut()
            .listing
            .insert((project_id.to_string(), dataset_id.map(str::to_string)));
        self
    }

    /// Make the metadata lookup of one table fail.
    #[must_use]
    pub fn with_failing_lookup(mut self, project_id: &str, dataset_id: &str, table_id: &str) -> Self {
        self.faults_mut().lookup.insert((
            project_id.to_string(),
            dataset_id.to_string(),
            table_id.to_string(),
        ));
        self
    }

    /// Sessions currently open.
    #[must_use]
    pub fn open_sessions(&self) -> usize {
        self.counters.open.load(Ordering::SeqCst)
    }

    /// Sessions opened over the catalog's lifetime.
    #[must_use]
    pub fn sessions_opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }
}

impl Catalog for MemoryCatalog {
    type Session = MemorySession;

    async fn connect(&self, project_id: &str) -> Result<Self::Session, CatalogError> {
        if self.faults.unreachable.contains(project_id) {
            return Err(CatalogError::Unavailable {
                project: project_id.to_string(),
                reason: String::from("injected connection failure"),
            });
        }
        self.counters.open.fetch_add(1, Ordering::SeqCst);
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(MemorySession {
            project_id: project_id.to_string(),
            projects: Arc::clone(&self.projects),
            faults: Arc::clone(&self.faults),
            counters: Arc::clone(&self.counters),
        })
    }
}

/// Session over a [`MemoryCatalog`]. Decrements the open count on drop.
#[derive(Debug)]
pub struct MemorySession {
    project_id: String,
    projects: Arc<Vec<MemoryProject>>,
    faults: Arc<Faults>,
    counters: Arc<Counters>,
}

impl MemorySession {
    fn project(&self) -> Option<&MemoryProject> {
        self.projects.iter().find(|p| p.id == self.project_id)
    }

    fn dataset(&self, dataset_id: &str) -> Option<&MemoryDataset> {
        self.project()
            .and_then(|p| p.datasets.iter().find(|d| d.id == dataset_id))
    }

    fn listing_fails(&self, dataset_id: Option<&str>) -> bool {
        self.faults
            .listing
            .contains(&(self.project_id.clone(), dataset_id.map(str::to_string)))
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.counters.open.fetch_sub(1, Ordering::SeqCst);
    }
}

impl CatalogSession for MemorySession {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    async fn list_datasets(&self) -> Result<Vec<String>, CatalogError> {
        if self.listing_fails(None) {
            return Err(CatalogError::Api {
                status: 500,
                message: format!("injected dataset listing failure for {}", self.project_id),
            });
        }
        Ok(self
            .project()
            .map(|p| p.datasets.iter().map(|d| d.id.clone()).collect())
            .unwrap_or_default())
    }

    async fn list_tables(&self, dataset_id: &str) -> Result<Vec<String>, CatalogError> {
        if self.listing_fails(Some(dataset_id)) {
            return Err(CatalogError::Api {
                status: 500,
                message: format!(
                    "injected table listing failure for {}.{dataset_id}",
                    self.project_id
                ),
            });
        }
        match self.dataset(dataset_id) {
            Some(dataset) => Ok(dataset.tables.iter().map(|t| t.id.clone()).collect()),
            None => Err(CatalogError::Api {
                status: 404,
                message: format!("Not found: Dataset {}:{dataset_id}", self.project_id),
            }),
        }
    }

    async fn table_metadata(
        &self,
        dataset_id: &str,
        table_id: &str,
    ) -> Result<Option<TableMetadata>, CatalogError> {
        let key = (
            self.project_id.clone(),
            dataset_id.to_string(),
            table_id.to_string(),
        );
        if self.faults.lookup.contains(&key) {
            return Err(CatalogError::Api {
                status: 500,
                message: format!(
                    "injected lookup failure for {}.{dataset_id}.{table_id}",
                    self.project_id
                ),
            });
        }
        Ok(self
            .dataset(dataset_id)
            .and_then(|d| d.tables.iter().find(|t| t.id == table_id))
            .map(|t| TableMetadata {
                full_id: format!("{}:{dataset_id}.{table_id}", self.project_id),
                last_modified: t.last_modified,
            }))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, day, 0, 0, 0).unwrap()
    }

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with_table("p", "sales", "orders", ts(1))
            .with_table("p", "sales", "refunds", ts(2))
            .with_table("p", "logs", "events_20200101", ts(3))
            .with_dataset("p", "empty")
    }

    #[tokio::test]
    async fn lists_in_insertion_order() {
        let catalog = catalog();
        let session = catalog.connect("p").await.unwrap();
        assert_eq!(
            session.list_datasets().await.unwrap(),
            vec!["sales", "logs", "empty"]
        );
        assert_eq!(
            session.list_tables("sales").await.unwrap(),
            vec!["orders", "refunds"]
        );
        assert!(session.list_tables("empty").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn lookup_reports_full_id_or_none() {
        let catalog = catalog();
        let session = catalog.connect("p").await.unwrap();
        let found = session.table_metadata("sales", "orders").await.unwrap();
        assert_eq!(
            found,
            Some(TableMetadata {
                full_id: "p:sales.orders".into(),
                last_modified: ts(1),
            })
        );
        assert_eq!(session.table_metadata("sales", "nope").await.unwrap(), None);
        assert_eq!(session.table_metadata("nope", "orders").await.unwrap(), None);
    }

    #[tokio::test]
    async fn with_table_replaces_existing() {
        let catalog = catalog().with_table("p", "sales", "orders", ts(9));
        let session = catalog.connect("p").await.unwrap();
        let found = session.table_metadata("sales", "orders").await.unwrap();
        assert_eq!(found.map(|m| m.last_modified), Some(ts(9)));
        assert_eq!(session.list_tables("sales").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_project_has_no_datasets() {
        let catalog = catalog();
        let session = catalog.connect("other").await.unwrap();
        assert!(session.list_datasets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn injected_failures() {
        let catalog = catalog()
            .with_unreachable_project("down")
            .with_failing_listing("p", None)
            .with_failing_listing("p", Some("logs"))
            .with_failing_lookup("p", "sales", "orders");

        assert!(matches!(
            catalog.connect("down").await,
            Err(CatalogError::Unavailable { .. })
        ));
        let session = catalog.connect("p").await.unwrap();
        assert!(session.list_datasets().await.is_err());
        assert!(session.list_tables("logs").await.is_err());
        assert!(session.list_tables("sales").await.is_ok());
        assert!(session.table_metadata("sales", "orders").await.is_err());
        assert!(session.table_metadata("sales", "refunds").await.is_ok());
    }

    #[tokio::test]
    async fn sessions_are_counted_and_released() {
        let catalog = catalog();
        {
            let _a = catalog.connect("p").await.unwrap();
            let _b = catalog.connect("p").await.unwrap();
            assert_eq!(catalog.open_sessions(), 2);
        }
        assert_eq!(catalog.open_sessions(), 0);
        assert_eq!(catalog.sessions_opened(), 2);
    }
}
