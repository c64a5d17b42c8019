//! Staleness thresholds.
//!
//! A [`ClockTime`] is a zone-less time of day; it becomes an instant only when
//! combined with an evaluation date and zone via [`ClockTime::on`] or
//! [`ClockTime::resolve_today`]. A [`DurationThreshold`] is a non-negative
//! maximum age.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::{format_duration, parse_duration};
use crate::errors::CoreError;

const CLOCK_FORMAT: &str = "%H:%M:%S";
const SHORT_CLOCK_FORMAT: &str = "%H:%M";

// ---------------------------------------------------------------------------
// ClockTime
// ---------------------------------------------------------------------------

/// Time-of-day cutoff, stored without a date or zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Build a clock time from its components. Returns `None` when out of range.
    #[must_use]
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    /// The underlying time of day.
    #[must_use]
    pub const fn time(self) -> NaiveTime {
        self.0
    }

    /// Resolve this clock time on `date` in `zone`.
    ///
    /// An ambiguous local time (clocks turned back) resolves to the earlier
    /// instant. A local time skipped by a forward transition resolves one hour
    /// later, which lands just past the gap for every hour-long DST shift.
    pub fn on<Z: TimeZone>(self, date: NaiveDate, zone: &Z) -> DateTime<Z> {
        let naive = date.and_time(self.0);
        zone.from_local_datetime(&naive)
            .earliest()
            .or_else(|| {
                zone.from_local_datetime(&(naive + TimeDelta::hours(1)))
                    .earliest()
            })
            .unwrap_or_else(|| zone.from_utc_datetime(&naive))
    }

    /// Resolve this clock time on the calendar date of `now` in `zone`.
    pub fn resolve_today<Z: TimeZone>(self, now: DateTime<Utc>, zone: &Z) -> DateTime<Z> {
        let today = now.with_timezone(zone).date_naive();
        self.on(today, zone)
    }

    /// `HH:MM`, the form used in staleness reasons.
    #[must_use]
    pub fn hh_mm(self) -> String {
        self.0.format(SHORT_CLOCK_FORMAT).to_string()
    }
}

impl FromStr for ClockTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, CLOCK_FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(trimmed, SHORT_CLOCK_FORMAT))
            .map(Self)
            .map_err(|_| CoreError::InvalidClockTime {
                input: s.to_string(),
            })
    }
}

impl TryFrom<String> for ClockTime {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CLOCK_FORMAT))
    }
}

// ---------------------------------------------------------------------------
// DurationThreshold
// ---------------------------------------------------------------------------

/// Maximum age a table may reach before it counts as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DurationThreshold(TimeDelta);

impl DurationThreshold {
    /// Wrap a delta, rejecting negative values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NegativeDuration`] when `delta < 0`.
    pub fn new(delta: TimeDelta) -> Result<Self, CoreError> {
        if delta < TimeDelta::zero() {
            return Err(CoreError::NegativeDuration(format_duration(delta)));
        }
        Ok(Self(delta))
    }

    #[must_use]
    pub const fn delta(self) -> TimeDelta {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for DurationThreshold {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_duration(s)?)
    }
}

impl TryFrom<String> for DurationThreshold {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DurationThreshold> for String {
    fn from(value: DurationThreshold) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DurationThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_duration(self.0))
    }
}
