//! Composition of the timeline stages behind two content-addressed caches.

use serde::Serialize;
use std::sync::Arc;

use crate::post::types::{Millis, Post, MINUTE_MS};

use super::cache::{self, CacheConfig, CacheStats, ComputationCache};
use super::clock::{Clock, SystemClock};
use super::cluster::{cluster_posts, DEFAULT_CLUSTER_WINDOW};
use super::labels::{generate_labels, DEFAULT_MAX_LABELS};
use super::position::{position_clusters, DEFAULT_MIN_SPACING};
use super::range::compute_range;
use super::types::{AxisLabel, MarkerCluster, TimeRange, TimelineView};

pub const DEFAULT_SWEEP_INTERVAL: Millis = 5.0 * MINUTE_MS;

/// Tunables for [`TimelineEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineConfig {
    /// Merge distance for clustering, in milliseconds.
    pub cluster_window: Millis,
    /// Minimum gap between adjacent markers, in axis percent.
    pub min_spacing: f64,
    /// Upper bound on label intervals across the range.
    pub max_labels: usize,
    /// Applied to both the range and the marker cache.
    pub cache: CacheConfig,
    /// How often the background sweeper purges expired entries, in milliseconds.
    pub sweep_interval: Millis,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            cluster_window: DEFAULT_CLUSTER_WINDOW,
            min_spacing: DEFAULT_MIN_SPACING,
            max_labels: DEFAULT_MAX_LABELS,
            cache: CacheConfig::default(),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EngineStats {
    pub ranges: CacheStats,
    pub markers: CacheStats,
}

/// Computes [`TimelineView`]s for post snapshots, reusing earlier results
/// while the post set is unchanged.
///
/// Range results are keyed by the post set; marker results by the post set
/// plus the range. Labels are cheap and always recomputed.
pub struct TimelineEngine {
    config: TimelineConfig,
    clock: Arc<dyn Clock>,
    ranges: ComputationCache<TimeRange>,
    markers: ComputationCache<Vec<MarkerCluster>>,
}

impl TimelineEngine {
    pub fn new(config: TimelineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: TimelineConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            ranges: ComputationCache::new("ranges", config.cache, clock.clone()),
            markers: ComputationCache::new("markers", config.cache, clock.clone()),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Visible window for `posts`.
    pub fn time_range(&self, posts: &[Post]) -> TimeRange {
        self.range_for_key(&cache::post_set_key(posts), posts)
    }

    /// Positioned markers for `posts` over `range`, sorted by position.
    pub fn markers(&self, posts: &[Post], range: &TimeRange) -> Vec<MarkerCluster> {
        self.markers_for_key(&cache::post_set_key(posts), posts, range)
    }

    /// Axis labels for `range`. Not cached.
    pub fn labels(&self, range: &TimeRange) -> Vec<AxisLabel> {
        generate_labels(range, self.config.max_labels)
    }

    /// Range, markers, and labels for one render.
    pub fn view(&self, posts: &[Post]) -> TimelineView {
        let key = cache::post_set_key(posts);
        let range = self.range_for_key(&key, posts);
        let markers = self.markers_for_key(&key, posts, &range);
        let labels = self.labels(&range);
        TimelineView {
            range,
            markers,
            labels,
        }
    }

    fn range_for_key(&self, key: &str, posts: &[Post]) -> TimeRange {
        self.ranges
            .get_or_insert_with(key, || compute_range(posts, self.clock.now()))
    }

    fn markers_for_key(&self, key: &str, posts: &[Post], range: &TimeRange) -> Vec<MarkerCluster> {
        let key = cache::marker_key(key, range);
        self.markers.get_or_insert_with(&key, || {
            let clusters = cluster_posts(posts, self.config.cluster_window);
            let markers = position_clusters(clusters, range, self.config.min_spacing);
            tracing::debug!(posts = posts.len(), markers = markers.len(), "markers computed");
            markers
        })
    }

    /// Forget every cached result, forcing the next call to recompute.
    pub fn invalidate_all(&self) {
        self.ranges.invalidate_all();
        self.markers.invalidate_all();
    }

    /// Purge expired entries from both caches. Returns the number removed.
    pub fn sweep_expired(&self) -> usize {
        self.ranges.sweep_expired() + self.markers.sweep_expired()
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            ranges: self.ranges.stats(),
            markers: self.markers.stats(),
        }
    }
}

impl Default for TimelineEngine {
    fn default() -> Self {
        Self::new(TimelineConfig::default())
    }
}
