//! Pattern-based ("flex") monitor config.
//!
//! Same hierarchy as [`crate::config`], except that `FlexDataset::id` and
//! `FlexTableConfig::table` are regular expressions matched against catalog
//! contents. Concrete entries may sit next to pattern entries at the project
//! and dataset levels; expansion appends them to the pattern-derived output.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::{Dataset, TableConfig};
use crate::shard::ShardPolicy;
use crate::threshold::{ClockTime, DurationThreshold};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FlexConfig {
    #[serde(rename = "FlexProject", default)]
    pub projects: Vec<FlexProject>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FlexProject {
    /// Project ID. Literal, not a pattern.
    #[serde(rename = "ID")]
    pub id: String,

    /// Concrete datasets appended after the expanded ones.
    #[serde(rename = "Dataset", default, skip_serializing_if = "Vec::is_empty")]
    pub datasets: Vec<Dataset>,

    #[serde(rename = "FlexDataset", default)]
    pub flex_datasets: Vec<FlexDataset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FlexDataset {
    /// Regular expression over dataset IDs.
    #[serde(rename = "ID")]
    pub id: String,

    /// Concrete table configs appended to every matched dataset.
    #[serde(rename = "TableConfig", default, skip_serializing_if = "Vec::is_empty")]
    pub table_configs: Vec<TableConfig>,

    #[serde(rename = "FlexTableConfig", default)]
    pub flex_table_configs: Vec<FlexTableConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FlexTableConfig {
    /// Regular expression over table IDs.
    #[serde(rename = "Table")]
    pub table: String,

    #[serde(
        rename = "DateForShards",
        default,
        skip_serializing_if = "ShardPolicy::is_none"
    )]
    #[schemars(with = "String")]
    pub date_for_shards: ShardPolicy,

    #[serde(
        rename = "TimeThreshold",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<String>")]
    pub time_threshold: Option<ClockTime>,

    #[serde(
        rename = "DurationThreshold",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<String>")]
    pub duration_threshold: Option<DurationThreshold>,
}

impl FlexTableConfig {
    /// A pattern entry must configure at least one threshold. A zero duration
    /// does not count.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.time_threshold.is_some() || self.duration_threshold.is_some_and(|d| !d.is_zero())
    }

    /// Concrete entry for one logical table matched by this pattern.
    ///
    /// Unsharded matches drop the shard policy; thresholds are copied either way.
    #[must_use]
    pub fn table_config_for(&self, prefix: &str, sharded: bool) -> TableConfig {
        TableConfig {
            table: prefix.to_string(),
            date_for_shards: if sharded {
                self.date_for_shards.clone()
            } else {
                ShardPolicy::None
            },
            time_threshold: self.time_threshold,
            duration_threshold: self.duration_threshold,
        }
    }
}
