//! Catalog error types.

use thiserror::Error;

/// Errors that can occur when talking to a metadata catalog.
///
/// "Table not found" is not an error: lookups return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the catalog.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The catalog returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the server asked us to wait.
        retry_after_secs: u64,
    },

    /// Failed to parse a catalog response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Required settings (credentials, project) are missing.
    #[error("catalog is not configured: {0}")]
    NotConfigured(String),

    /// The access token command failed or printed nothing.
    #[error("access token command '{command}' failed: {reason}")]
    TokenCommand { command: String, reason: String },

    /// The catalog could not be reached for a project.
    #[error("catalog unavailable for project '{project}': {reason}")]
    Unavailable { project: String, reason: String },
}
