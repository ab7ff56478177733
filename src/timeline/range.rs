//! Visible time window for a set of posts.

use crate::post::types::{Millis, Post, DAY_MS, HOUR_MS};

use super::types::TimeRange;

/// Narrowest window ever shown.
pub const MIN_SPAN: Millis = HOUR_MS;
/// Window shown when there is nothing to plot.
pub const EMPTY_SPAN: Millis = DAY_MS;
/// Fraction of the data span added to each side.
pub const PADDING_RATIO: f64 = 0.05;

/// Compute the window that contains every post with a valid timestamp.
///
/// With no usable posts the window is the 24 hours ending at `now`. A data
/// span under one hour is widened symmetrically around its midpoint to exactly
/// one hour; anything wider gets 5% padding on both ends.
pub fn compute_range(posts: &[Post], now: Millis) -> TimeRange {
    let mut times = posts
        .iter()
        .filter(|p| p.has_valid_time())
        .map(|p| p.created_at);

    let Some(first) = times.next() else {
        return TimeRange::new(now - EMPTY_SPAN, now);
    };
    let (min, max) = times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));

    let span = max - min;
    if span < MIN_SPAN {
        let mid = min + span / 2.0;
        return TimeRange::new(mid - MIN_SPAN / 2.0, mid + MIN_SPAN / 2.0);
    }

    let pad = span * PADDING_RATIO;
    TimeRange::new(min - pad, max + pad)
}
