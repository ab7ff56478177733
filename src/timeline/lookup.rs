//! Click and hover lookups over positioned markers.

use super::types::MarkerCluster;

/// The marker that contains `post_id`.
pub fn marker_for_post<'a>(markers: &'a [MarkerCluster], post_id: &str) -> Option<&'a MarkerCluster> {
    markers.iter().find(|m| m.contains_post(post_id))
}

/// The marker closest to `position` (a 0–100 axis percentage). Ties go to
/// the marker listed first, which is the earlier one in time. At a crowded
/// right edge that need not be the one with the smaller position.
pub fn nearest_marker(markers: &[MarkerCluster], position: f64) -> Option<&MarkerCluster> {
    if !position.is_finite() {
        return None;
    }
    markers.iter().min_by(|a, b| {
        (a.position - position)
            .abs()
            .total_cmp(&(b.position - position).abs())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(ids: &[&str], position: f64) -> MarkerCluster {
        MarkerCluster {
            representative_time: 0.0,
            post_ids: ids.iter().map(|s| s.to_string()).collect(),
            position,
        }
    }

    #[test]
    fn finds_marker_by_post() {
        let markers = vec![marker(&["a", "b"], 10.0), marker(&["c"], 50.0)];
        assert_eq!(marker_for_post(&markers, "c").unwrap().position, 50.0);
        assert_eq!(marker_for_post(&markers, "b").unwrap().position, 10.0);
        assert!(marker_for_post(&markers, "zzz").is_none());
    }

    #[test]
    fn nearest_prefers_left_on_tie() {
        let markers = vec![marker(&["a"], 10.0), marker(&["b"], 30.0)];
        assert_eq!(nearest_marker(&markers, 20.0).unwrap().post_ids, vec!["a"]);
        assert_eq!(nearest_marker(&markers, 29.0).unwrap().post_ids, vec!["b"]);
        assert!(nearest_marker(&markers, f64::NAN).is_none());
        assert!(nearest_marker(&[], 5.0).is_none());
    }

    #[test]
    fn tie_goes_to_earlier_marker_when_positions_are_out_of_order() {
        // Layout produced by three markers crowding the right edge.
        let markers = vec![marker(&["a"], 99.0), marker(&["b"], 98.0), marker(&["c"], 100.0)];
        assert_eq!(nearest_marker(&markers, 98.5).unwrap().post_ids, vec!["a"]);
        assert_eq!(nearest_marker(&markers, 97.0).unwrap().post_ids, vec!["b"]);
    }
}
