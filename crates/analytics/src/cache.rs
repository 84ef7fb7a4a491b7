//! Memoized chart series
//!
//! Chart building is a pure function of the dataset and the selector, so
//! results can be reused until either changes. Keys are an xxh3 hash of:
//!
//! - the dataset version supplied by the caller (see [`dataset_version`])
//! - platform, metric and period
//! - the selection, sorted and de-duplicated
//! - the window threshold for day periods, so a cached series expires when
//!   the calendar day rolls over
//!
//! Entries are evicted least-recently-used once the capacity is reached.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::trace;
use xxhash_rust::xxh3::xxh3_64;

use crate::chart::{ChartDataPoint, ChartQuery, build_chart_points_at};
use crate::dataset::Dashboard;

/// Default number of cached series
pub const DEFAULT_CAPACITY: usize = 64;

/// Cache statistics
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Lookups served from the cache
    pub hits: AtomicU64,

    /// Lookups that had to build the series
    pub misses: AtomicU64,

    /// Total lookups
    pub total_lookups: AtomicU64,
}

impl CacheStats {
    /// Hit rate (0.0 - 1.0)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let total = self.total_lookups.load(Ordering::Relaxed);
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Reset statistics
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.total_lookups.store(0, Ordering::Relaxed);
    }
}

/// Bounded cache of built chart series
pub struct ChartCache {
    entries: Mutex<SeriesLru>,
    capacity: usize,
    stats: CacheStats,
}

impl ChartCache {
    /// Create a cache holding up to `capacity` series (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Mutex::new(SeriesLru::new(capacity)),
            capacity,
            stats: CacheStats::default(),
        }
    }

    /// Return the cached series for this input, building it on a miss
    pub fn get_or_build(
        &self,
        version: u64,
        dashboard: &Dashboard,
        query: &ChartQuery,
        now: DateTime<Utc>,
    ) -> Arc<Vec<ChartDataPoint>> {
        self.stats.total_lookups.fetch_add(1, Ordering::Relaxed);

        let key = cache_key(version, query, now);
        if let Some(points) = self.entries.lock().get(key) {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            trace!(key, "chart cache hit");
            return points;
        }
        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        trace!(key, "chart cache miss");

        let points = Arc::new(build_chart_points_at(dashboard, query, now));
        self.entries.lock().insert(key, Arc::clone(&points));
        points
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of cached series
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of cached series
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every cached series and reset statistics
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.stats.reset();
    }
}

impl Default for ChartCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Content version of a raw dashboard payload
pub fn dataset_version(payload: &[u8]) -> u64 {
    xxh3_64(payload)
}

/// Hash everything a chart series depends on
///
/// Strings are length-prefixed so no performer name can collide with a
/// separator.
fn cache_key(version: u64, query: &ChartQuery, now: DateTime<Utc>) -> u64 {
    let mut buf = Vec::with_capacity(64);
    buf.extend_from_slice(&version.to_le_bytes());
    push_str(&mut buf, query.platform.as_str());
    push_str(&mut buf, query.metric.as_str());
    push_str(&mut buf, query.period.as_str());

    let selected: BTreeSet<&str> = query.selected.iter().map(String::as_str).collect();
    buf.extend_from_slice(&(selected.len() as u64).to_le_bytes());
    for name in selected {
        push_str(&mut buf, name);
    }

    if let Some(threshold) = query.period.threshold(now) {
        buf.extend_from_slice(&threshold.timestamp().to_le_bytes());
    }

    xxh3_64(&buf)
}

fn push_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u64).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

type Series = Arc<Vec<ChartDataPoint>>;

/// Series by key, evicted least-recently-used
///
/// Every access takes a fresh stamp; `order` maps stamps back to keys so the
/// oldest entry is the first one in the index.
struct SeriesLru {
    slots: HashMap<u64, (Series, u64)>,
    order: BTreeMap<u64, u64>,
    next_stamp: u64,
    capacity: usize,
}

impl SeriesLru {
    fn new(capacity: usize) -> Self {
        Self {
            slots: HashMap::with_capacity(capacity),
            order: BTreeMap::new(),
            next_stamp: 0,
            capacity,
        }
    }

    fn stamp(&mut self) -> u64 {
        self.next_stamp += 1;
        self.next_stamp
    }

    fn get(&mut self, key: u64) -> Option<Series> {
        let stamp = self.stamp();
        let (series, last) = self.slots.get_mut(&key)?;
        self.order.remove(last);
        *last = stamp;
        self.order.insert(stamp, key);
        Some(Arc::clone(series))
    }

    fn insert(&mut self, key: u64, series: Series) {
        let stamp = self.stamp();
        if let Some((_, last)) = self.slots.insert(key, (series, stamp)) {
            self.order.remove(&last);
        }
        self.order.insert(stamp, key);

        while self.slots.len() > self.capacity {
            let Some((_, oldest)) = self.order.pop_first() else {
                break;
            };
            self.slots.remove(&oldest);
            trace!(key = oldest, "evicted chart series");
        }
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }
}
