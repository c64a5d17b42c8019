//! Cross-cutting error types for tblmonit.
//!
//! Domain-specific errors (`ConfigError`, `CatalogError`, `EngineError`) are
//! defined in their respective crates. Errors converge into `anyhow` in
//! `tbl-cli`.

use thiserror::Error;

/// Errors raised while parsing core value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A time-of-day threshold could not be parsed.
    #[error("Invalid clock time '{input}': expected HH:MM:SS or HH:MM")]
    InvalidClockTime { input: String },

    /// A duration string could not be parsed.
    #[error("Invalid duration '{input}': {reason}")]
    InvalidDuration { input: String, reason: String },

    /// A duration threshold was negative.
    #[error("Duration threshold must not be negative: {0}")]
    NegativeDuration(String),
}
