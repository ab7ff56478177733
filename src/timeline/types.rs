//! Value types produced by the timeline engine.

use serde::{Deserialize, Serialize};

use crate::post::types::Millis;

/// Visible window of the timeline axis. `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: Millis,
    pub end: Millis,
}

impl TimeRange {
    pub fn new(start: Millis, end: Millis) -> Self {
        Self { start, end }
    }

    pub fn span(&self) -> Millis {
        self.end - self.start
    }

    pub fn contains(&self, t: Millis) -> bool {
        t >= self.start && t <= self.end
    }

    /// Percentage of the way from `start` to `end`, unclamped. `None` when the
    /// span is zero or not finite.
    pub fn percent_of(&self, t: Millis) -> Option<f64> {
        let span = self.span();
        if span <= 0.0 || !span.is_finite() {
            return None;
        }
        Some((t - self.start) / span * 100.0)
    }
}

/// A group of posts drawn as one marker on the axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerCluster {
    /// Running mean of the member posts' `created_at`.
    pub representative_time: Millis,
    /// Member post ids in merge order.
    pub post_ids: Vec<String>,
    /// Percentage along the axis in `[0, 100]`. Zero until positioned.
    pub position: f64,
}

impl MarkerCluster {
    pub(crate) fn seed(post_id: &str, time: Millis) -> Self {
        Self {
            representative_time: time,
            post_ids: vec![post_id.to_string()],
            position: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.post_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.post_ids.is_empty()
    }

    pub fn contains_post(&self, post_id: &str) -> bool {
        self.post_ids.iter().any(|id| id == post_id)
    }
}

/// One tick on the time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub time: Millis,
    pub position: f64,
    pub text: String,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineView {
    pub range: TimeRange,
    pub markers: Vec<MarkerCluster>,
    pub labels: Vec<AxisLabel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_is_none_for_degenerate_range() {
        assert_eq!(TimeRange::new(5.0, 5.0).percent_of(5.0), None);
        assert_eq!(TimeRange::new(0.0, f64::INFINITY).percent_of(1.0), None);
    }

    #[test]
    fn percent_of_midpoint() {
        assert_eq!(TimeRange::new(0.0, 200.0).percent_of(50.0), Some(25.0));
    }
}
