//! Engine error types.

use tbl_catalog::CatalogError;

/// Errors that abort an expansion or freshness run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A catalog session could not be opened.
    #[error("failed to connect to project '{project}'")]
    Connect {
        project: String,
        #[source]
        source: CatalogError,
    },

    /// Dataset enumeration failed.
    #[error("failed to list datasets of project '{project}'")]
    ListDatasets {
        project: String,
        #[source]
        source: CatalogError,
    },

    /// Table enumeration failed.
    #[error("failed to list tables of '{project}.{dataset}'")]
    ListTables {
        project: String,
        dataset: String,
        #[source]
        source: CatalogError,
    },

    /// A metadata lookup failed with strict lookups enabled.
    #[error("failed to look up table '{table}'")]
    Lookup {
        table: String,
        #[source]
        source: CatalogError,
    },

    /// A dataset or table pattern is not a valid regular expression.
    #[error("invalid pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A table pattern configures neither a time nor a duration threshold.
    #[error(
        "pattern '{pattern}' in '{project}.{dataset}' sets neither TimeThreshold nor DurationThreshold"
    )]
    MissingThreshold {
        project: String,
        dataset: String,
        pattern: String,
    },
}
