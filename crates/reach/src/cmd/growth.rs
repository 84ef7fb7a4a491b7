//! Growth command - change of a platform metric over a period
//!
//! # Usage
//!
//! ```bash
//! reach growth --data dashboard.json --platform instagram --period 7d
//! reach growth --data dashboard.json -P spotify -m monthly_listeners -f json
//! ```

use std::io::{self, Write};

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use reach_analytics::{
    Dashboard, Growth, Metric, Period, Platform, Trend, aggregate_platform, calculate_growth_at,
    format_compact_number, format_percent,
};
use reach_config::{Config, OutputFormat};
use serde::Serialize;

use super::{SelectionArgs, load_dashboard};

/// Growth command arguments
#[derive(Args, Debug)]
pub struct GrowthArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Latest value and growth badge for one metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthReport {
    pub platform: Platform,
    pub metric: Metric,
    pub period: Period,
    pub latest: f64,
    pub growth: Growth,
    pub trend: Trend,
}

impl GrowthReport {
    /// Compute the report for the selected performers
    pub fn build(
        dashboard: &Dashboard,
        platform: Platform,
        metric: Metric,
        selected: &[String],
        period: Period,
        now: DateTime<Utc>,
    ) -> Self {
        let aggregated = aggregate_platform(dashboard, platform, selected);
        let data = aggregated.as_ref().and_then(|m| m.get(metric));

        let latest = data.map_or(0.0, |d| d.latest);
        let growth = data.map_or(Growth::ZERO, |d| calculate_growth_at(&d.entries, period, now));

        Self {
            platform,
            metric,
            period,
            latest,
            growth,
            trend: growth.trend(),
        }
    }
}

pub fn run(args: GrowthArgs, config: &Config) -> Result<()> {
    let resolved = args.selection.resolve(config)?;
    let loaded = load_dashboard(&args.selection.data)?;

    let report = GrowthReport::build(
        &loaded.dashboard,
        resolved.platform,
        resolved.metric,
        &resolved.performers,
        resolved.period,
        resolved.now,
    );

    let stdout = io::stdout();
    write_growth(&mut stdout.lock(), &report, resolved.format)
}

/// Write a growth report in the requested format
pub fn write_growth(out: &mut impl Write, report: &GrowthReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "platform,metric,period,latest,absolute,percent")?;
            writeln!(
                out,
                "{},{},{},{},{},{}",
                report.platform,
                report.metric,
                report.period,
                report.latest,
                report.growth.absolute,
                report.growth.percent
            )?;
        }
        OutputFormat::Table => {
            let arrow = match report.trend {
                Trend::Up => "▲",
                Trend::Down => "▼",
                Trend::Stable => "=",
            };
            writeln!(
                out,
                "{} {} ({})",
                report.platform, report.metric, report.period
            )?;
            writeln!(out, "{}", "-".repeat(38))?;
            writeln!(out, "{:<20} {:>15}", "Latest", format_compact_number(report.latest))?;
            writeln!(
                out,
                "{:<20} {:>15}",
                "Change",
                format_compact_number(report.growth.absolute)
            )?;
            writeln!(
                out,
                "{:<20} {:>15}",
                "Growth",
                format!("{} {}", arrow, format_percent(report.growth.percent, 2))
            )?;
        }
    }

    Ok(())
}
