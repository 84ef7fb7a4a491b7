//! Per-performer breakdown of a platform metric

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::dataset::{Dashboard, Metric, Platform};
use crate::selection::aggregate_platform;

/// One performer's share of a metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformerShare {
    /// Performer name
    pub performer: String,
    /// Latest value for this performer (0 if missing)
    pub value: f64,
    /// Share of the aggregate total, in percent
    pub percentage: f64,
}

/// Breakdown of a metric across performers
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Breakdown {
    /// Aggregated latest value for the selection
    pub total: f64,
    /// Shares sorted by value, largest first
    pub shares: Vec<PerformerShare>,
}

impl Breakdown {
    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// Break a metric down by performer
///
/// Scoped to `selected` (all performers when empty). Performers without the
/// platform or metric report 0. Percentages are relative to the aggregated
/// total and are 0 when that total is not positive.
pub fn performer_breakdown(
    dashboard: &Dashboard,
    platform: Platform,
    metric: Metric,
    selected: &[String],
) -> Breakdown {
    let total = aggregate_platform(dashboard, platform, selected)
        .and_then(|m| m.get(metric).map(|d| d.latest))
        .unwrap_or(0.0);

    let mut shares: Vec<PerformerShare> = dashboard
        .performers
        .iter()
        .filter(|(name, _)| selected.is_empty() || selected.contains(*name))
        .map(|(name, data)| {
            let value = data
                .platform(platform)
                .and_then(|m| m.get(metric))
                .map_or(0.0, |d| d.latest);
            let percentage = if total > 0.0 {
                value / total * 100.0
            } else {
                0.0
            };
            PerformerShare {
                performer: name.clone(),
                value,
                percentage,
            }
        })
        .collect();

    shares.sort_by(|a, b| match b.value.total_cmp(&a.value) {
        Ordering::Equal => a.performer.cmp(&b.performer),
        other => other,
    });

    Breakdown { total, shares }
}
