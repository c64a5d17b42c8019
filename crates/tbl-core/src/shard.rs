//! Shard resolution for daily-sharded table families.
//!
//! A sharded family is a set of physical tables `prefix + YYYYMMDD`. The
//! [`ShardPolicy`] of a monitored table decides which day's shard stands for
//! "today"; [`resolve_identifier`] turns a prefix into that physical table ID,
//! and [`logical_prefix`] goes the other way for tables found in the catalog.

use std::fmt;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Date format of shard suffixes.
pub const SHARD_DATE_FORMAT: &str = "%Y%m%d";

/// Number of digits in a shard suffix.
const SHARD_SUFFIX_LEN: usize = 8;

/// Which day's shard represents the current state of a table.
///
/// Serialized as the raw `DateForShards` string. Values that are not
/// recognized are kept verbatim so they survive a config round trip and can be
/// reported by `config check`, but they resolve like [`ShardPolicy::None`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShardPolicy {
    /// Not sharded: the prefix is the table ID.
    #[default]
    None,
    Today,
    OneDayAgo,
    FirstDayOfMonth,
    Unrecognized(String),
}

impl ShardPolicy {
    /// Parse a `DateForShards` value. Never fails.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "NONE" => Self::None,
            "TODAY" => Self::Today,
            "ONE_DAY_AGO" => Self::OneDayAgo,
            "FIRST_DAY_OF_MONTH" | "FIRST_DAY_OF_THE_MONTH" => Self::FirstDayOfMonth,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "",
            Self::Today => "TODAY",
            Self::OneDayAgo => "ONE_DAY_AGO",
            Self::FirstDayOfMonth => "FIRST_DAY_OF_MONTH",
            Self::Unrecognized(raw) => raw,
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Date of the shard that represents `today`, or `None` when unsharded.
    #[must_use]
    pub fn shard_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Today => Some(today),
            Self::OneDayAgo => Some(today.checked_sub_days(Days::new(1)).unwrap_or(today)),
            Self::FirstDayOfMonth => Some(today.with_day(1).unwrap_or(today)),
            Self::None | Self::Unrecognized(_) => None,
        }
    }
}

impl From<String> for ShardPolicy {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ShardPolicy> for String {
    fn from(value: ShardPolicy) -> Self {
        match value {
            ShardPolicy::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ShardPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("NONE"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Physical table ID expected to exist at `now` for a monitored prefix.
///
/// Dates are computed on the calendar of `zone`. Unsharded and unrecognized
/// policies return `prefix` unchanged.
pub fn resolve_identifier<Z: TimeZone>(
    prefix: &str,
    policy: &ShardPolicy,
    now: DateTime<Utc>,
    zone: &Z,
) -> String {
    let today = now.with_timezone(zone).date_naive();
    match policy.shard_date(today) {
        Some(date) => format!("{prefix}{}", date.format(SHARD_DATE_FORMAT)),
        None => prefix.to_string(),
    }
}

/// Strip a trailing 8-digit shard suffix, if present.
///
/// `events_20200101` → `events_`; `events` and `events_2020_abc` are returned
/// unchanged. Any 8 trailing digits count, whether or not they form a valid
/// date.
#[must_use]
pub fn logical_prefix(table_id: &str) -> &str {
    let bytes = table_id.as_bytes();
    if bytes.len() < SHARD_SUFFIX_LEN {
        return table_id;
    }
    let split = bytes.len() - SHARD_SUFFIX_LEN;
    if bytes[split..].iter().all(u8::is_ascii_digit) {
        &table_id[..split]
    } else {
        table_id
    }
}
