//! Chart command - bucketed series for a platform metric
//!
//! # Usage
//!
//! ```bash
//! reach chart --data dashboard.json --platform youtube --period 7d
//! reach chart --data dashboard.json -P spotify -m monthly_listeners -p "Artist A" -f csv
//! ```

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use reach_analytics::{
    ChartCache, ChartDataPoint, ChartQuery, Period, SeriesStats, format_compact_number,
    format_percent,
};
use reach_config::{Config, OutputFormat};
use serde::Serialize;
use tracing::debug;

use super::{SelectionArgs, load_dashboard};

/// Chart command arguments
#[derive(Args, Debug)]
pub struct ChartArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Rendered chart: query echo, points and summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartReport<'a> {
    pub platform: &'a str,
    pub metric: &'a str,
    pub period: Period,
    pub performers: &'a [String],
    pub points: &'a [ChartDataPoint],
    pub stats: SeriesStats,
}

pub fn run(args: ChartArgs, config: &Config) -> Result<()> {
    let resolved = args.selection.resolve(config)?;
    let loaded = load_dashboard(&args.selection.data)?;

    let query = ChartQuery::new(resolved.platform, resolved.metric)
        .with_performers(resolved.performers.iter().cloned())
        .with_period(resolved.period);

    let cache = ChartCache::new(config.dashboard.cache_capacity);
    let points = cache.get_or_build(loaded.version, &loaded.dashboard, &query, resolved.now);
    debug!(points = points.len(), period = %resolved.period, "built chart series");

    let report = ChartReport {
        platform: resolved.platform.as_str(),
        metric: resolved.metric.as_str(),
        period: resolved.period,
        performers: &resolved.performers,
        points: &points,
        stats: SeriesStats::from_points(&points),
    };

    let stdout = io::stdout();
    write_chart(&mut stdout.lock(), &report, resolved.format)
}

/// Write a chart report in the requested format
pub fn write_chart(out: &mut impl Write, report: &ChartReport<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "date,value,previous_value")?;
            for point in report.points {
                let previous = point
                    .previous_value
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                writeln!(out, "{},{},{}", point.date, point.value, previous)?;
            }
        }
        OutputFormat::Table => {
            if report.points.is_empty() {
                writeln!(out, "(no data)")?;
                return Ok(());
            }

            writeln!(
                out,
                "{} {} ({})",
                report.platform, report.metric, report.period
            )?;
            writeln!(out, "{:<20} {:>15} {:>10}", "Date", "Value", "Change")?;
            writeln!(out, "{}", "-".repeat(47))?;
            for point in report.points {
                let change = point
                    .percent_change()
                    .map(|p| format_percent(p, 1))
                    .unwrap_or_else(|| "-".to_string());
                writeln!(
                    out,
                    "{:<20} {:>15} {:>10}",
                    point.date,
                    format_compact_number(point.value),
                    change
                )?;
            }

            let stats = &report.stats;
            writeln!(out, "{}", "-".repeat(47))?;
            writeln!(
                out,
                "Total: {}  Min: {}  Max: {}  Avg: {}",
                format_compact_number(stats.total),
                format_compact_number(stats.min),
                format_compact_number(stats.max),
                format_compact_number(stats.avg)
            )?;
        }
    }

    Ok(())
}
