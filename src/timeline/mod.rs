//! Timeline computation: visible range, clustered and positioned markers,
//! axis labels, and the cache that memoizes them.
//!
//! The stages are plain functions over post slices:
//!
//! 1. [`range::compute_range`] picks the visible window.
//! 2. [`cluster::cluster_posts`] groups posts that are close in time.
//! 3. [`position::position_clusters`] places groups on a 0–100 axis.
//! 4. [`labels::generate_labels`] produces axis ticks for the window.
//!
//! [`TimelineEngine`] chains them and caches stages 1–3 by post-set content.

pub mod cache;
pub mod clock;
pub mod cluster;
pub mod engine;
pub mod labels;
pub mod lookup;
pub mod position;
pub mod range;
pub mod sweeper;
pub mod types;

pub use cache::{CacheConfig, CacheStats, ComputationCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{EngineStats, TimelineConfig, TimelineEngine};
pub use lookup::{marker_for_post, nearest_marker};
pub use sweeper::spawn_sweeper;
pub use types::{AxisLabel, MarkerCluster, TimeRange, TimelineView};
