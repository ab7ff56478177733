//! Post record and timestamp helpers.
//!
//! Timestamps are `f64` milliseconds since the Unix epoch. A timestamp that
//! failed to parse upstream is carried as a non-finite value rather than
//! rejected, and the timeline engine skips such posts.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Milliseconds since the Unix epoch.
pub type Millis = f64;

pub const MINUTE_MS: Millis = 60_000.0;
pub const HOUR_MS: Millis = 60.0 * MINUTE_MS;
pub const DAY_MS: Millis = 24.0 * HOUR_MS;

/// A diary post as stored by a [`PostStore`](super::store::PostStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// UUID v7 (time-sortable) primary key.
    pub id: String,
    /// Creation time in epoch milliseconds.
    pub created_at: Millis,
    /// Last edit time in epoch milliseconds. Equal to `created_at` until edited.
    pub updated_at: Millis,
    /// The body text of the post.
    pub content: String,
}

impl Post {
    /// Build a post that has never been edited.
    pub fn new(id: impl Into<String>, created_at: Millis, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at,
            updated_at: created_at,
            content: content.into(),
        }
    }

    /// Whether `created_at` is usable for timeline arithmetic.
    pub fn has_valid_time(&self) -> bool {
        self.created_at.is_finite()
    }
}

/// Errors raised for user-supplied post input.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("invalid timestamp {0:?}: expected RFC 3339, e.g. 2024-05-01T10:00:00Z")]
    InvalidTimestamp(String),
    #[error("post content must not be empty")]
    EmptyContent,
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> Millis {
    Utc::now().timestamp_millis() as Millis
}

/// Parse an RFC 3339 string into epoch milliseconds.
pub fn parse_timestamp(s: &str) -> Result<Millis, PostError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc).timestamp_millis() as Millis)
        .map_err(|_| PostError::InvalidTimestamp(s.to_string()))
}

/// Convert epoch milliseconds to a UTC datetime. `None` for non-finite or
/// out-of-range values.
pub fn to_datetime(ms: Millis) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(ms.round() as i64).single()
}

/// Render epoch milliseconds as RFC 3339, or `"invalid"` if unrepresentable.
pub fn format_timestamp(ms: Millis) -> String {
    to_datetime(ms)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| "invalid".to_string())
}
