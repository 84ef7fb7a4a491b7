//! CLI subcommands
//!
//! Every command reads a dashboard payload from disk and renders one view
//! of it. Shared argument handling lives here.

pub mod breakdown;
pub mod chart;
pub mod explore;
pub mod growth;
pub mod performers;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Args;
use reach_analytics::{Dashboard, Metric, Period, Platform, dataset_version, parse_datetime};
use reach_config::{Config, OutputFormat};
use tracing::info;

/// Arguments shared by the per-metric commands
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Dashboard payload (JSON) to read
    #[arg(short, long)]
    pub data: PathBuf,

    /// Platform (youtube, instagram, spotify)
    #[arg(short = 'P', long)]
    pub platform: String,

    /// Metric (followers, views, video_count, post_count, monthly_listeners)
    #[arg(short, long, default_value = "followers")]
    pub metric: String,

    /// Performer to include; repeat for more (default: all performers)
    #[arg(short = 'p', long = "performer")]
    pub performers: Vec<String>,

    /// Period (today, 7d, 30d). Defaults to [dashboard].default_period
    #[arg(short = 'r', long)]
    pub period: Option<String>,

    /// Reference time as RFC 3339 (default: current time)
    #[arg(long)]
    pub now: Option<String>,

    /// Output format (table, json, csv). Defaults to [dashboard].format
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Selection arguments resolved against the config
#[derive(Debug, Clone)]
pub struct Resolved {
    pub platform: Platform,
    pub metric: Metric,
    pub performers: Vec<String>,
    pub period: Period,
    pub now: DateTime<Utc>,
    pub format: OutputFormat,
}

impl SelectionArgs {
    /// Parse and validate every argument, filling gaps from the config
    pub fn resolve(&self, config: &Config) -> Result<Resolved> {
        Ok(Resolved {
            platform: Platform::parse(&self.platform)?,
            metric: Metric::parse(&self.metric)?,
            performers: self.performers.clone(),
            period: resolve_period(self.period.as_deref(), config)?,
            now: resolve_now(self.now.as_deref())?,
            format: resolve_format(self.format.as_deref(), config)?,
        })
    }
}

/// A dashboard loaded from disk, with its content version
pub struct Loaded {
    pub dashboard: Dashboard,
    pub version: u64,
}

/// Read and parse a dashboard payload
pub fn load_dashboard(path: &Path) -> Result<Loaded> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read dashboard '{}'", path.display()))?;
    let dashboard = Dashboard::from_slice(&bytes)
        .with_context(|| format!("failed to parse dashboard '{}'", path.display()))?;
    let version = dataset_version(&bytes);

    info!(
        path = %path.display(),
        performers = dashboard.performers.len(),
        has_total = dashboard.total.is_some(),
        "loaded dashboard"
    );

    Ok(Loaded { dashboard, version })
}

/// Period from the flag, else the config default
pub fn resolve_period(flag: Option<&str>, config: &Config) -> Result<Period> {
    let raw = flag.unwrap_or(&config.dashboard.default_period);
    Ok(Period::parse(raw)?)
}

/// Output format from the flag, else the config default
pub fn resolve_format(flag: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match flag {
        Some(raw) => match OutputFormat::parse(raw) {
            Some(format) => Ok(format),
            None => bail!("unknown output format '{}' (expected table, json, csv)", raw),
        },
        None => Ok(config.dashboard.format),
    }
}

/// Reference time from the flag, else the wall clock
pub fn resolve_now(flag: Option<&str>) -> Result<DateTime<Utc>> {
    match flag {
        Some(raw) => parse_datetime(raw)
            .with_context(|| format!("invalid --now '{}': expected RFC 3339", raw)),
        None => Ok(Utc::now()),
    }
}
