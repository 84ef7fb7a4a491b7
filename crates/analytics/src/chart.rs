//! Chart series building
//!
//! Turns the aggregate series of one platform metric into an ordered,
//! gap-free list of points ready for rendering:
//!
//! 1. Take the `total` aggregate entries for the platform and metric
//! 2. Keep only the selected performers (no selection means everyone)
//! 3. Drop entries older than the period window
//! 4. Keep the latest snapshot per performer in each bucket and sum them
//! 5. Sort buckets ascending and link each point to its predecessor
//! 6. For `today`, keep only the last [`TODAY_MAX_POINTS`] points

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bucket::latest_per_bucket;
use crate::dataset::{Dashboard, Metric, MetricEntry, Platform};
use crate::period::{Period, parse_datetime};

/// Maximum number of intraday points shown for `today`
pub const TODAY_MAX_POINTS: usize = 9;

/// A single rendered chart point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataPoint {
    /// Bucket key (full timestamp for `today`, `YYYY-MM-DD` otherwise)
    pub date: String,
    /// Sum of the latest snapshot per performer in this bucket
    pub value: f64,
    /// Value of the preceding point, `None` for the first one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<f64>,
}

impl ChartDataPoint {
    /// Create a point without a predecessor
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
            previous_value: None,
        }
    }

    /// Set the predecessor value
    pub fn with_previous(mut self, previous: f64) -> Self {
        self.previous_value = Some(previous);
        self
    }

    /// Percent change from the previous point
    ///
    /// `None` for the first point or when the previous value is zero.
    pub fn percent_change(&self) -> Option<f64> {
        let previous = self.previous_value?;
        if previous == 0.0 {
            return None;
        }
        let change = (self.value - previous) / previous * 100.0;
        change.is_finite().then_some(change)
    }
}

/// Selector for one chart: platform metric, performers and period
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartQuery {
    /// Platform to chart
    pub platform: Platform,
    /// Metric key within the platform
    pub metric: Metric,
    /// Selected performers; empty means all
    pub selected: Vec<String>,
    /// Lookback period
    pub period: Period,
}

impl ChartQuery {
    /// Chart every performer over the default period
    pub fn new(platform: Platform, metric: Metric) -> Self {
        Self {
            platform,
            metric,
            selected: Vec::new(),
            period: Period::default(),
        }
    }

    /// Restrict to a set of performers
    pub fn with_performers<I, S>(mut self, performers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = performers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the lookback period
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Whether an aggregate entry belongs to the selection
    ///
    /// Untagged entries only pass when nothing is selected.
    pub fn includes(&self, entry: &MetricEntry) -> bool {
        if self.selected.is_empty() {
            return true;
        }
        entry
            .performer
            .as_deref()
            .is_some_and(|p| self.selected.iter().any(|s| s == p))
    }
}

/// Build chart points using the current wall clock for day windows
pub fn build_chart_points(dashboard: &Dashboard, query: &ChartQuery) -> Vec<ChartDataPoint> {
    build_chart_points_at(dashboard, query, Utc::now())
}

/// Build chart points with an explicit reference time
///
/// `now` only anchors the `7d`/`30d` windows. The `today` window is anchored
/// on the latest selected entry instead, so stale data still charts.
pub fn build_chart_points_at(
    dashboard: &Dashboard,
    query: &ChartQuery,
    now: DateTime<Utc>,
) -> Vec<ChartDataPoint> {
    let Some(data) = dashboard.metric(query.platform, query.metric) else {
        debug!(
            platform = %query.platform,
            metric = %query.metric,
            "no aggregate series for chart"
        );
        return Vec::new();
    };

    let selected: Vec<&MetricEntry> = data.entries.iter().filter(|e| query.includes(e)).collect();

    let threshold = match query.period.threshold(now) {
        Some(threshold) => threshold,
        None => match latest_anchor(&selected) {
            Some(latest) => latest - Duration::hours(24),
            None => return Vec::new(),
        },
    };

    let mut dropped = 0usize;
    let in_window: Vec<&MetricEntry> = selected
        .into_iter()
        .filter(|e| match parse_datetime(&e.datetime) {
            Some(dt) => dt >= threshold,
            None => {
                dropped += 1;
                false
            }
        })
        .collect();

    if dropped > 0 {
        debug!(dropped, "skipped entries with unparseable datetime");
    }

    let period = query.period;
    let buckets = latest_per_bucket(in_window, |e| period.bucket_key(&e.datetime));

    let mut points = Vec::with_capacity(buckets.len());
    let mut previous: Option<f64> = None;
    for (date, value) in buckets {
        points.push(ChartDataPoint {
            date: date.to_string(),
            value,
            previous_value: previous,
        });
        previous = Some(value);
    }

    if period == Period::Today && points.len() > TODAY_MAX_POINTS {
        let excess = points.len() - TODAY_MAX_POINTS;
        points.drain(..excess);
    }

    debug!(
        platform = %query.platform,
        metric = %query.metric,
        period = %period,
        points = points.len(),
        "built chart series"
    );

    points
}

/// Latest recorded instant among entries, by lexicographic `datetime`
fn latest_anchor(entries: &[&MetricEntry]) -> Option<DateTime<Utc>> {
    let latest = entries.iter().map(|e| e.datetime.as_str()).max()?;
    parse_datetime(latest)
}

/// Summary statistics over a chart series
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Sum of point values
    pub total: f64,
    /// Smallest point value
    pub min: f64,
    /// Largest point value
    pub max: f64,
    /// Mean point value
    pub avg: f64,
}

impl SeriesStats {
    /// Compute stats for a series; all zero when empty
    pub fn from_points(points: &[ChartDataPoint]) -> Self {
        if points.is_empty() {
            return Self::default();
        }

        let total: f64 = points.iter().map(|p| p.value).sum();
        let min = points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
        let max = points
            .iter()
            .map(|p| p.value)
            .fold(f64::NEG_INFINITY, f64::max);
        let avg = total / points.len() as f64;

        Self {
            total,
            min,
            max,
            avg,
        }
    }
}
