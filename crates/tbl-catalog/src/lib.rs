//! # tbl-catalog
//!
//! Read-only access to the table metadata catalog.
//!
//! The engine only needs three questions answered: which datasets a project
//! has, which tables a dataset has, and when a table was last modified. Those
//! are the [`CatalogSession`] methods. A [`Catalog`] opens one session per
//! project; dropping the session releases it.
//!
//! Implementations:
//! - [`BigQueryCatalog`]: the BigQuery v2 REST API via `reqwest`
//! - [`MemoryCatalog`]: an in-memory catalog for tests and dry runs

pub mod bigquery;
pub mod memory;

mod error;
mod http;
mod token;

pub use bigquery::{BigQueryCatalog, BigQuerySession};
pub use error::CatalogError;
pub use memory::{MemoryCatalog, MemorySession};
pub use token::resolve_access_token;

use std::future::Future;

use chrono::{DateTime, Utc};

/// Metadata of a single physical table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMetadata {
    /// Fully qualified ID as reported by the catalog (`project:dataset.table`).
    pub full_id: String,
    pub last_modified: DateTime<Utc>,
}

/// Opens per-project catalog sessions.
pub trait Catalog {
    type Session: CatalogSession;

    /// Open a session scoped to `project_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the catalog cannot be reached or is not
    /// configured.
    fn connect(
        &self,
        project_id: &str,
    ) -> impl Future<Output = Result<Self::Session, CatalogError>> + Send;
}

/// Read operations against one project. Released on drop.
pub trait CatalogSession {
    fn project_id(&self) -> &str;

    /// IDs of every dataset in the project, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if enumeration fails.
    fn list_datasets(&self) -> impl Future<Output = Result<Vec<String>, CatalogError>> + Send;

    /// IDs of every table in `dataset_id`, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if enumeration fails.
    fn list_tables(
        &self,
        dataset_id: &str,
    ) -> impl Future<Output = Result<Vec<String>, CatalogError>> + Send;

    /// Metadata for one table, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for failures other than "not found".
    fn table_metadata(
        &self,
        dataset_id: &str,
        table_id: &str,
    ) -> impl Future<Output = Result<Option<TableMetadata>, CatalogError>> + Send;
}
