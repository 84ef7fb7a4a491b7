//! Performer selection and aggregated platform data
//!
//! Callers own a [`FilterState`] and pass it into each computation; nothing
//! here keeps selection state between calls.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::ChartQuery;
use crate::dataset::{Dashboard, Metric, MetricData, Platform, PlatformMetrics};
use crate::period::Period;

/// Dashboard filter selections
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Lookback period
    pub period: Period,
    /// Selected performers; empty means all
    pub selected: Vec<String>,
}

impl FilterState {
    /// Filter over every performer for a period
    pub fn new(period: Period) -> Self {
        Self {
            period,
            selected: Vec::new(),
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

    /// True when no performer is selected
    pub fn is_all(&self) -> bool {
        self.selected.is_empty()
    }

    /// Chart selector for a platform metric under this filter
    pub fn chart_query(&self, platform: Platform, metric: Metric) -> ChartQuery {
        ChartQuery::new(platform, metric)
            .with_performers(self.selected.iter().cloned())
            .with_period(self.period)
    }
}

/// Platform metrics for the selection
///
/// With no selection this is the backend aggregate. Otherwise each selected
/// performer's `latest` values are summed and entries concatenated per metric.
/// Copied entries are tagged with their performer so the merged history still
/// de-duplicates per performer. Returns `None` when nothing matches.
pub fn aggregate_platform(
    dashboard: &Dashboard,
    platform: Platform,
    selected: &[String],
) -> Option<PlatformMetrics> {
    if selected.is_empty() {
        return dashboard
            .total
            .as_ref()
            .and_then(|t| t.platform(platform))
            .cloned();
    }

    let mut result = PlatformMetrics::default();
    let mut matched = false;
    let mut seen = BTreeSet::new();

    for name in selected {
        if !seen.insert(name.as_str()) {
            continue;
        }
        let Some(metrics) = dashboard
            .performer(name)
            .and_then(|p| p.platform(platform))
        else {
            debug!(performer = %name, platform = %platform, "selected performer has no data");
            continue;
        };
        matched = true;

        for metric in metrics.metrics() {
            let Some(source) = metrics.get(metric) else {
                continue;
            };
            let target = result.get_mut(metric).get_or_insert_with(MetricData::default);
            target.latest += source.latest;
            target.entries.extend(source.entries.iter().map(|entry| {
                let mut entry = entry.clone();
                if entry.performer.is_none() {
                    entry.performer = Some(name.clone());
                }
                entry
            }));
        }
    }

    matched.then_some(result)
}
