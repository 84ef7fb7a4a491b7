//! Analytics error types

use thiserror::Error;

/// Analytics errors
///
/// Only input parsing can fail. Chart building and growth calculation are
/// infallible and degrade to empty or zero results instead.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Unknown period name
    #[error("invalid period: {0} (use today, 7d or 30d)")]
    InvalidPeriod(String),

    /// Unknown platform name
    #[error("invalid platform: {0} (use youtube, instagram or spotify)")]
    InvalidPlatform(String),

    /// Unknown metric name
    #[error("invalid metric: {0}")]
    InvalidMetric(String),

    /// Dashboard payload could not be decoded
    #[error("invalid dashboard payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
