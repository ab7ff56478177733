//! Greedy time-window clustering of posts into markers.
//!
//! Posts are visited in input order, not time order. Each post joins the
//! *first* open cluster whose running mean lies within `window` of it; if none
//! does, it opens a new cluster. Clusters are never re-merged, so when a post
//! is within reach of two clusters the earlier-opened one wins. Reordering the
//! input can therefore change which cluster a borderline post lands in.

use crate::post::types::{Millis, Post, MINUTE_MS};

use super::types::MarkerCluster;

pub const DEFAULT_CLUSTER_WINDOW: Millis = 5.0 * MINUTE_MS;

/// Group posts into unpositioned clusters. Posts without a finite
/// `created_at` are skipped. Output is in cluster-opening order.
pub fn cluster_posts(posts: &[Post], window: Millis) -> Vec<MarkerCluster> {
    let mut clusters: Vec<MarkerCluster> = Vec::new();
    let mut skipped = 0usize;

    for post in posts {
        if !post.has_valid_time() {
            skipped += 1;
            continue;
        }
        let t = post.created_at;

        match clusters
            .iter_mut()
            .find(|c| (c.representative_time - t).abs() <= window)
        {
            Some(cluster) => {
                cluster.post_ids.push(post.id.clone());
                let n = cluster.post_ids.len() as f64;
                cluster.representative_time = (cluster.representative_time * (n - 1.0) + t) / n;
            }
            None => clusters.push(MarkerCluster::seed(&post.id, t)),
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "posts with invalid timestamps left off the timeline");
    }

    clusters
}
