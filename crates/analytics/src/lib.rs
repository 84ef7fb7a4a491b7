//! Reach Analytics
//!
//! Metric aggregation for the reach social dashboard.
//!
//! # Overview
//!
//! The dashboard API returns per-performer, per-platform snapshot histories
//! (followers, views, listeners, ...). This crate turns them into what the
//! dashboard shows:
//!
//! - **Chart series**: bucketed, de-duplicated points for a platform metric
//! - **Growth**: absolute and percent change over a period
//! - **Breakdowns**: each performer's share of a metric
//! - **Selection**: platform data aggregated over selected performers
//!
//! Every value in the payload is a cumulative snapshot. All computations keep
//! the latest snapshot per performer within a bucket before summing, so
//! repeated recordings never inflate a total.
//!
//! # Usage
//!
//! ```
//! use reach_analytics::{
//!     ChartQuery, Dashboard, Metric, Period, Platform, build_chart_points,
//! };
//!
//! let dashboard = Dashboard::from_json("{}").unwrap();
//! let query = ChartQuery::new(Platform::Youtube, Metric::Followers)
//!     .with_performers(["Artist A"])
//!     .with_period(Period::SevenDays);
//!
//! let points = build_chart_points(&dashboard, &query);
//! assert!(points.is_empty());
//! ```
//!
//! # Purity
//!
//! Nothing here holds state between calls. Results depend only on the
//! inputs (and the wall clock for `7d`/`30d` windows), which is what makes
//! [`ChartCache`] safe.

pub mod breakdown;
pub mod bucket;
pub mod cache;
pub mod chart;
pub mod dataset;
pub mod error;
pub mod format;
pub mod growth;
pub mod period;
pub mod selection;

#[cfg(test)]
mod bucket_test;
#[cfg(test)]
mod format_test;

// Re-exports for convenience
pub use breakdown::{Breakdown, PerformerShare, performer_breakdown};
pub use bucket::latest_per_bucket;
pub use cache::{CacheStats, ChartCache, dataset_version};
pub use chart::{
    ChartDataPoint, ChartQuery, SeriesStats, TODAY_MAX_POINTS, build_chart_points,
    build_chart_points_at,
};
pub use dataset::{
    Dashboard, Metric, MetricData, MetricEntry, PerformerData, Platform, PlatformMetrics,
    TOTAL_KEY,
};
pub use error::{AnalyticsError, Result};
pub use format::{format_compact_number, format_percent};
pub use growth::{Growth, Trend, calculate_growth, calculate_growth_at};
pub use period::{Period, parse_datetime};
pub use selection::{FilterState, aggregate_platform};
