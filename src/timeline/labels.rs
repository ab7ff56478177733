//! Axis labels scaled to the visible span.

use crate::post::types::{to_datetime, Millis, DAY_MS, HOUR_MS, MINUTE_MS};

use super::types::{AxisLabel, TimeRange};

pub const DEFAULT_MAX_LABELS: usize = 10;

/// Label granularity chosen from the span of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelScale {
    /// Span under an hour: quarter-hour ticks.
    Minutes,
    /// Span under a day: hourly ticks.
    Hours,
    /// Anything longer: daily ticks.
    Days,
}

impl LabelScale {
    pub fn for_span(span: Millis) -> Self {
        if span < HOUR_MS {
            Self::Minutes
        } else if span < DAY_MS {
            Self::Hours
        } else {
            Self::Days
        }
    }

    /// Candidate intervals, finest first. The first entry is the base step.
    fn ladder(&self) -> &'static [Millis] {
        const MINUTES: &[Millis] = &[15.0 * MINUTE_MS, 30.0 * MINUTE_MS];
        const HOURS: &[Millis] = &[HOUR_MS, 2.0 * HOUR_MS, 3.0 * HOUR_MS, 6.0 * HOUR_MS, 12.0 * HOUR_MS];
        const DAYS: &[Millis] = &[DAY_MS, 2.0 * DAY_MS, 7.0 * DAY_MS, 14.0 * DAY_MS, 30.0 * DAY_MS];
        match self {
            Self::Minutes => MINUTES,
            Self::Hours => HOURS,
            Self::Days => DAYS,
        }
    }

    fn format(&self) -> &'static str {
        match self {
            Self::Minutes | Self::Hours => "%H:%M",
            Self::Days => "%m/%d",
        }
    }

    /// Smallest ladder step giving at most `max_labels` intervals. Past the
    /// end of the ladder, whole multiples of the largest step.
    fn interval(&self, span: Millis, max_labels: usize) -> Millis {
        let max = max_labels as f64;
        let ladder = self.ladder();
        if let Some(step) = ladder.iter().copied().find(|step| span / step <= max) {
            return step;
        }
        let largest = ladder[ladder.len() - 1];
        (span / max / largest).ceil() * largest
    }
}

/// Evenly spaced labels from the first interval boundary at or after
/// `range.start` through `range.end`. Times are aligned and rendered in UTC.
pub fn generate_labels(range: &TimeRange, max_labels: usize) -> Vec<AxisLabel> {
    let span = range.span();
    if max_labels == 0 || range.percent_of(range.start).is_none() {
        return Vec::new();
    }

    let scale = LabelScale::for_span(span);
    let interval = scale.interval(span, max_labels);
    let first = (range.start / interval).ceil() * interval;

    let mut labels = Vec::new();
    let mut k = 0.0;
    loop {
        // Multiply rather than accumulate to avoid drift across many steps.
        let time = first + k * interval;
        if time > range.end {
            break;
        }
        let Some(position) = range.percent_of(time) else {
            break;
        };
        let text = to_datetime(time)
            .map(|dt| dt.format(scale.format()).to_string())
            .unwrap_or_default();
        labels.push(AxisLabel {
            time,
            position,
            text,
        });
        k += 1.0;
    }

    labels
}
