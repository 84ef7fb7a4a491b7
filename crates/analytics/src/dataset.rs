//! Dashboard payload model
//!
//! Mirrors the JSON returned by the dashboard API: one object per performer
//! plus a synthetic `total` aggregate, each holding per-platform metric bags.
//!
//! ```json
//! {
//!   "Artist A": { "youtube": { "followers": { "latest": 120, "entries": [...] } } },
//!   "total":    { "youtube": { "followers": { "latest": 180, "entries": [...] } } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

/// Key of the synthetic aggregate in the dashboard payload
pub const TOTAL_KEY: &str = "total";

/// One recorded snapshot of a metric
///
/// `value` is a cumulative total as of `datetime`, not a delta. `performer`
/// is only present on entries of the `total` aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    /// Snapshot value
    pub value: f64,
    /// Recording time (ISO 8601)
    pub datetime: String,
    /// Performer this snapshot belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
}

impl MetricEntry {
    /// Create an untagged entry
    pub fn new(value: f64, datetime: impl Into<String>) -> Self {
        Self {
            value,
            datetime: datetime.into(),
            performer: None,
        }
    }

    /// Create an entry attributed to a performer
    pub fn for_performer(
        value: f64,
        datetime: impl Into<String>,
        performer: impl Into<String>,
    ) -> Self {
        Self {
            value,
            datetime: datetime.into(),
            performer: Some(performer.into()),
        }
    }
}

/// Latest value plus full history of one metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricData {
    /// Most recently known snapshot value
    pub latest: f64,
    /// Snapshot history, in any order
    pub entries: Vec<MetricEntry>,
}

/// Metric keys tracked per platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Followers / subscribers
    Followers,
    /// Total views (YouTube)
    Views,
    /// Published videos (YouTube)
    VideoCount,
    /// Published posts (Instagram)
    PostCount,
    /// Monthly listeners (Spotify)
    MonthlyListeners,
}

impl Metric {
    /// All metric keys
    pub const ALL: [Metric; 5] = [
        Metric::Followers,
        Metric::Views,
        Metric::VideoCount,
        Metric::PostCount,
        Metric::MonthlyListeners,
    ];

    /// Parse a metric from its payload key
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "followers" => Ok(Self::Followers),
            "views" => Ok(Self::Views),
            "video_count" | "videos" => Ok(Self::VideoCount),
            "post_count" | "posts" => Ok(Self::PostCount),
            "monthly_listeners" | "listeners" => Ok(Self::MonthlyListeners),
            _ => Err(AnalyticsError::InvalidMetric(s.to_string())),
        }
    }

    /// Payload key of this metric
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Followers => "followers",
            Self::Views => "views",
            Self::VideoCount => "video_count",
            Self::PostCount => "post_count",
            Self::MonthlyListeners => "monthly_listeners",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Social platforms on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// YouTube channel metrics
    Youtube,
    /// Instagram profile metrics
    Instagram,
    /// Spotify artist metrics
    Spotify,
}

impl Platform {
    /// All platforms in display order
    pub const ALL: [Platform; 3] = [Platform::Youtube, Platform::Instagram, Platform::Spotify];

    /// Parse a platform from its payload key
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "youtube" | "yt" => Ok(Self::Youtube),
            "instagram" | "ig" => Ok(Self::Instagram),
            "spotify" => Ok(Self::Spotify),
            _ => Err(AnalyticsError::InvalidPlatform(s.to_string())),
        }
    }

    /// Payload key of this platform
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Instagram => "instagram",
            Self::Spotify => "spotify",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metric bag for one platform; not every platform populates every key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<MetricData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<MetricData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_count: Option<MetricData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_count: Option<MetricData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_listeners: Option<MetricData>,
}

impl PlatformMetrics {
    /// Series for a metric, if present
    pub fn get(&self, metric: Metric) -> Option<&MetricData> {
        self.slot(metric).as_ref()
    }

    pub(crate) fn get_mut(&mut self, metric: Metric) -> &mut Option<MetricData> {
        match metric {
            Metric::Followers => &mut self.followers,
            Metric::Views => &mut self.views,
            Metric::VideoCount => &mut self.video_count,
            Metric::PostCount => &mut self.post_count,
            Metric::MonthlyListeners => &mut self.monthly_listeners,
        }
    }

    fn slot(&self, metric: Metric) -> &Option<MetricData> {
        match metric {
            Metric::Followers => &self.followers,
            Metric::Views => &self.views,
            Metric::VideoCount => &self.video_count,
            Metric::PostCount => &self.post_count,
            Metric::MonthlyListeners => &self.monthly_listeners,
        }
    }

    /// Metrics present in this bag
    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL.into_iter().filter(|m| self.get(*m).is_some())
    }
}

/// Per-platform metrics of one performer (or of the aggregate)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformerData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<PlatformMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<PlatformMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify: Option<PlatformMetrics>,
}

impl PerformerData {
    /// Metric bag for a platform, if present
    pub fn platform(&self, platform: Platform) -> Option<&PlatformMetrics> {
        match platform {
            Platform::Youtube => self.youtube.as_ref(),
            Platform::Instagram => self.instagram.as_ref(),
            Platform::Spotify => self.spotify.as_ref(),
        }
    }

    /// Platforms present for this performer
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        Platform::ALL
            .into_iter()
            .filter(|p| self.platform(*p).is_some())
    }
}

/// Full dashboard payload
///
/// Serialized as a flat object keyed by performer name, with the aggregate
/// under [`TOTAL_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, PerformerData>",
    into = "BTreeMap<String, PerformerData>"
)]
pub struct Dashboard {
    /// Per-performer metrics
    pub performers: BTreeMap<String, PerformerData>,
    /// Backend-summed aggregate; entries carry a `performer` tag
    pub total: Option<PerformerData>,
}

impl Dashboard {
    /// Decode a dashboard payload
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Decode a dashboard payload from raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Performer names in sorted order, excluding the aggregate
    pub fn performer_names(&self) -> Vec<&str> {
        self.performers.keys().map(String::as_str).collect()
    }

    /// Metrics of a single performer
    pub fn performer(&self, name: &str) -> Option<&PerformerData> {
        self.performers.get(name)
    }

    /// Aggregate series for a platform and metric
    pub fn metric(&self, platform: Platform, metric: Metric) -> Option<&MetricData> {
        self.total
            .as_ref()?
            .platform(platform)?
            .get(metric)
    }

    /// True when there is neither performer data nor an aggregate
    pub fn is_empty(&self) -> bool {
        self.performers.is_empty() && self.total.is_none()
    }
}

impl From<BTreeMap<String, PerformerData>> for Dashboard {
    fn from(mut map: BTreeMap<String, PerformerData>) -> Self {
        let total = map.remove(TOTAL_KEY);
        Self {
            performers: map,
            total,
        }
    }
}

impl From<Dashboard> for BTreeMap<String, PerformerData> {
    fn from(dashboard: Dashboard) -> Self {
        let mut map = dashboard.performers;
        if let Some(total) = dashboard.total {
            map.insert(TOTAL_KEY.to_string(), total);
        }
        map
    }
}
