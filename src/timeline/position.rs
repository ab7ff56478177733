//! Placement of clusters on the 0–100% axis with collision avoidance.

use super::types::{MarkerCluster, TimeRange};

pub const DEFAULT_MIN_SPACING: f64 = 2.0;

/// Assign each cluster a position and return them in time order, which is
/// left-to-right order except at a crowded right edge.
///
/// Raw positions are clamped to `[0, 100]`, then pushed right so neighbours
/// sit at least `min_spacing` apart. If that pushes the last marker past 100
/// it is clamped and only its left neighbour is pulled back to
/// `100 - min_spacing`. With three or more markers crowded at the right edge
/// that neighbour can land left of the marker before it, so both spacing and
/// ascending position order can break there. Positions never leave `[0, 100]`.
///
/// Returns an empty list when the range has no width.
pub fn position_clusters(
    clusters: Vec<MarkerCluster>,
    range: &TimeRange,
    min_spacing: f64,
) -> Vec<MarkerCluster> {
    if range.percent_of(range.start).is_none() {
        tracing::debug!(start = range.start, end = range.end, "degenerate range, no markers");
        return Vec::new();
    }

    let mut positioned: Vec<MarkerCluster> = clusters
        .into_iter()
        .filter_map(|mut c| {
            let raw = range.percent_of(c.representative_time)?;
            if !raw.is_finite() {
                return None;
            }
            c.position = raw.clamp(0.0, 100.0);
            Some(c)
        })
        .collect();

    positioned.sort_by(|a, b| a.position.total_cmp(&b.position));

    for i in 1..positioned.len() {
        let floor = positioned[i - 1].position + min_spacing;
        if positioned[i].position < floor {
            positioned[i].position = floor;
        }
    }

    let n = positioned.len();
    if n > 0 && positioned[n - 1].position > 100.0 {
        positioned[n - 1].position = 100.0;
        if n > 1 {
            positioned[n - 2].position = (100.0 - min_spacing).max(0.0);
        }
        // Markers further left can still sit past the edge when many crowd it.
        for c in positioned.iter_mut() {
            c.position = c.position.min(100.0);
        }
    }

    positioned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(id: &str, t: f64) -> MarkerCluster {
        MarkerCluster::seed(id, t)
    }

    fn positions(clusters: &[MarkerCluster]) -> Vec<f64> {
        clusters.iter().map(|c| c.position).collect()
    }

    fn range() -> TimeRange {
        TimeRange::new(0.0, 1000.0)
    }

    #[test]
    fn close_markers_are_pushed_apart() {
        let out = position_clusters(
            vec![cluster("b", 505.0), cluster("a", 500.0)],
            &range(),
            DEFAULT_MIN_SPACING,
        );
        assert_eq!(positions(&out), vec![50.0, 52.0]);
        assert_eq!(out[0].post_ids, vec!["a"]);
    }

    #[test]
    fn out_of_range_times_are_clamped() {
        let out = position_clusters(
            vec![cluster("early", -500.0), cluster("late", 5000.0)],
            &range(),
            DEFAULT_MIN_SPACING,
        );
        assert_eq!(positions(&out), vec![0.0, 100.0]);
    }

    #[test]
    fn right_edge_overflow_pulls_neighbour_back() {
        let out = position_clusters(
            vec![cluster("a", 995.0), cluster("b", 1000.0)],
            &range(),
            DEFAULT_MIN_SPACING,
        );
        // 99.5 then pushed to 101.5 -> clamped to 100, neighbour to 98.
        assert_eq!(positions(&out), vec![98.0, 100.0]);
    }

    #[test]
    fn single_marker_past_edge_is_clamped() {
        let out = position_clusters(vec![cluster("a", 1000.0)], &range(), 5.0);
        assert_eq!(positions(&out), vec![100.0]);
    }

    #[test]
    fn crowded_edge_keeps_bounds_but_not_spacing() {
        let out = position_clusters(
            vec![cluster("a", 990.0), cluster("b", 995.0), cluster("c", 1000.0)],
            &range(),
            DEFAULT_MIN_SPACING,
        );
        // 99, 101, 103 -> last clamps to 100, middle to 98, first stays at 99.
        assert_eq!(positions(&out), vec![99.0, 98.0, 100.0]);
        assert!(out.iter().all(|c| (0.0..=100.0).contains(&c.position)));
        // Output stays in time order even where positions are out of order.
        let ids: Vec<&str> = out.iter().map(|c| c.post_ids[0].as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn many_markers_at_edge_stay_in_bounds() {
        let clusters = (0..5).map(|i| cluster(&format!("c{i}"), 999.0)).collect();
        let out = position_clusters(clusters, &range(), DEFAULT_MIN_SPACING);
        assert_eq!(out.len(), 5);
        assert!(out.iter().all(|c| (0.0..=100.0).contains(&c.position)));
        assert_eq!(out[4].position, 100.0);
        assert_eq!(out[3].position, 98.0);
    }

    #[test]
    fn degenerate_range_yields_nothing() {
        let out = position_clusters(
            vec![cluster("a", 10.0)],
            &TimeRange::new(10.0, 10.0),
            DEFAULT_MIN_SPACING,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn spread_out_markers_keep_raw_positions() {
        let out = position_clusters(
            vec![cluster("c", 900.0), cluster("a", 100.0), cluster("b", 500.0)],
            &range(),
            DEFAULT_MIN_SPACING,
        );
        assert_eq!(positions(&out), vec![10.0, 50.0, 90.0]);
    }
}
