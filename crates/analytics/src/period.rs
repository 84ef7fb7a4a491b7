//! Dashboard periods, bucket keys and lookback thresholds
//!
//! A period controls two things at once: how entries are bucketed
//! (one bucket per recorded instant for `today`, one per calendar day for
//! `7d`/`30d`) and how far back the window reaches.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

/// Lookback period selected on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    /// Last 24 hours, intraday resolution
    #[serde(rename = "today")]
    Today,
    /// Last 7 complete calendar days
    #[serde(rename = "7d")]
    SevenDays,
    /// Last 30 complete calendar days
    #[default]
    #[serde(rename = "30d")]
    ThirtyDays,
}

impl Period {
    /// All periods in display order
    pub const ALL: [Period; 3] = [Period::Today, Period::SevenDays, Period::ThirtyDays];

    /// Parse a period from its dashboard name
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(Self::Today),
            "7d" => Ok(Self::SevenDays),
            "30d" => Ok(Self::ThirtyDays),
            _ => Err(AnalyticsError::InvalidPeriod(s.to_string())),
        }
    }

    /// Dashboard name of this period
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
        }
    }

    /// Number of days the window reaches back, `None` for `today`
    pub fn lookback_days(&self) -> Option<i64> {
        match self {
            Self::Today => None,
            Self::SevenDays => Some(7),
            Self::ThirtyDays => Some(30),
        }
    }

    /// Bucket key for a recorded datetime
    ///
    /// `today` keeps the full timestamp; day periods keep only `YYYY-MM-DD`.
    pub fn bucket_key<'a>(&self, datetime: &'a str) -> &'a str {
        match self {
            Self::Today => datetime,
            Self::SevenDays | Self::ThirtyDays => date_part(datetime),
        }
    }

    /// Inclusive lower bound of the window for day periods
    ///
    /// `now` is aligned to midnight (UTC) before subtracting so the window
    /// always covers complete calendar days. Returns `None` for `today`,
    /// whose window is anchored by each caller on its own data.
    pub fn threshold(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.lookback_days()
            .map(|days| start_of_day(now) - Duration::days(days))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date portion (`YYYY-MM-DD`) of an ISO 8601 datetime
pub fn date_part(datetime: &str) -> &str {
    datetime.split_once('T').map_or(datetime, |(date, _)| date)
}

/// Parse a recorded datetime
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and bare
/// `YYYY-MM-DD` dates. Returns `None` for anything else.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

/// Calendar date key (`YYYY-MM-DD`) of an instant
pub(crate) fn date_key(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

fn start_of_day(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
        .unwrap_or(dt)
}
