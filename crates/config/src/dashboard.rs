//! Dashboard defaults for the CLI

use serde::Deserialize;

/// Periods the dashboard understands
pub const KNOWN_PERIODS: &[&str] = &["today", "7d", "30d"];

/// Result output format
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text table (default)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated values
    Csv,
}

impl OutputFormat {
    /// Parse an output format name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Dashboard configuration
///
/// # Example
///
/// ```toml
/// [dashboard]
/// default_period = "7d"
/// cache_capacity = 64
/// format = "table"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Period used when a command does not pass `--period`
    /// Default: "30d"
    pub default_period: String,

    /// Number of chart series kept in memory
    /// Default: 64
    pub cache_capacity: usize,

    /// Output format used when a command does not pass `--format`
    /// Default: table
    pub format: OutputFormat,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_period: "30d".to_string(),
            cache_capacity: 64,
            format: OutputFormat::Table,
        }
    }
}
