//! # tbl-engine
//!
//! The two passes of tblmonit:
//!
//! - [`expand`]: compile a pattern-based [`tbl_core::FlexConfig`] into a
//!   concrete [`tbl_core::Config`] by querying the catalog
//! - [`FreshnessChecker`]: evaluate a concrete config at a given instant and
//!   report stale tables with their reasons
//!
//! Both are generic over [`tbl_catalog::Catalog`] and process projects,
//! datasets and tables sequentially, one catalog session per project.
//! [`validate`] checks config files offline.

pub mod expand;
pub mod freshness;
pub mod validate;

mod error;

pub use error::EngineError;
pub use expand::{collapse_shard_families, expand};
pub use freshness::{FreshnessChecker, MISSING_TABLE_REASON, evaluate};
pub use validate::{Finding, Severity, check_config, check_flex_config};
