//! # tbl-core
//!
//! Core types for tblmonit.
//!
//! This crate provides the foundational types shared across all tblmonit crates:
//! - Concrete monitor config (`Config` → `Project` → `Dataset` → `TableConfig`)
//! - Pattern-based flex config (`FlexConfig` and friends)
//! - Staleness thresholds (`ClockTime`, `DurationThreshold`) and the Go-style
//!   duration codec used to read and print them
//! - Shard policies, the shard resolver, and the logical-prefix heuristic
//! - Freshness results produced by an evaluation run
//! - Cross-cutting error types
//!
//! Nothing in this crate reads the wall clock or the process time zone: every
//! function that depends on "now" takes the instant and the zone as arguments.

pub mod config;
pub mod duration;
pub mod errors;
pub mod flex;
pub mod responses;
pub mod shard;
pub mod threshold;

pub use config::{Config, Dataset, Project, TableConfig};
pub use errors::CoreError;
pub use flex::{FlexConfig, FlexDataset, FlexProject, FlexTableConfig};
pub use responses::FreshnessResult;
pub use shard::{ShardPolicy, logical_prefix, resolve_identifier};
pub use threshold::{ClockTime, DurationThreshold};
