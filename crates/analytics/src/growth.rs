//! Growth between the latest day and a period-relative reference day
//!
//! Entries are collapsed to one aggregate per calendar date (latest snapshot
//! per performer, summed), then the latest date is compared to a reference
//! date picked from the period:
//!
//! - `today`: the earliest date on or after `now - 24h`
//! - `7d` / `30d`: the latest date on or before `now - N days`, falling back
//!   to the oldest date when the history is shorter than the window
//!
//! `Growth::ZERO` doubles as the "not enough data" and "no change" result.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::bucket::latest_per_bucket;
use crate::dataset::MetricEntry;
use crate::period::{Period, date_key, date_part};

/// Absolute and percent change of an aggregated metric
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Growth {
    /// Latest value minus reference value
    pub absolute: f64,
    /// Change relative to the reference value, 0 when the reference is 0
    pub percent: f64,
}

/// Direction of a growth badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Growth {
    /// No change / insufficient data
    pub const ZERO: Growth = Growth {
        absolute: 0.0,
        percent: 0.0,
    };

    /// Growth from a reference value to the latest value
    ///
    /// Never yields NaN or infinity: a zero reference reports 0 percent and
    /// any non-finite input collapses to [`Growth::ZERO`].
    pub fn between(latest: f64, reference: f64) -> Self {
        let absolute = latest - reference;
        let percent = if reference == 0.0 {
            0.0
        } else {
            absolute / reference * 100.0
        };

        if !absolute.is_finite() || !percent.is_finite() {
            return Self::ZERO;
        }

        Self { absolute, percent }
    }

    /// Badge direction, by the sign of the absolute change
    pub fn trend(&self) -> Trend {
        if self.absolute > 0.0 {
            Trend::Up
        } else if self.absolute < 0.0 {
            Trend::Down
        } else {
            Trend::Stable
        }
    }
}

/// Calculate growth using the current wall clock
pub fn calculate_growth(entries: &[MetricEntry], period: Period) -> Growth {
    calculate_growth_at(entries, period, Utc::now())
}

/// Calculate growth with an explicit reference time
///
/// Input order does not matter. Fewer than two distinct dates, or a
/// reference date equal to the latest date, yield [`Growth::ZERO`].
pub fn calculate_growth_at(entries: &[MetricEntry], period: Period, now: DateTime<Utc>) -> Growth {
    if entries.is_empty() {
        return Growth::ZERO;
    }

    let by_date = latest_per_bucket(entries, |e| date_part(&e.datetime));
    if by_date.len() < 2 {
        trace!(dates = by_date.len(), "not enough dates for growth");
        return Growth::ZERO;
    }

    let Some((&latest_date, &latest_value)) = by_date.last_key_value() else {
        return Growth::ZERO;
    };

    let reference = match period.lookback_days() {
        None => {
            let cutoff = date_key(now - Duration::hours(24));
            by_date.iter().find(|(date, _)| **date >= cutoff.as_str())
        }
        Some(days) => {
            let cutoff = date_key(now - Duration::days(days));
            by_date
                .iter()
                .rev()
                .find(|(date, _)| **date <= cutoff.as_str())
                .or_else(|| by_date.first_key_value())
        }
    };

    let Some((&reference_date, &reference_value)) = reference else {
        trace!(period = %period, "no reference date in window");
        return Growth::ZERO;
    };

    if reference_date == latest_date {
        return Growth::ZERO;
    }

    Growth::between(latest_value, reference_value)
}
