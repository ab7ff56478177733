//! SQLite-backed [`PostStore`].
//!
//! Timestamps are stored as RFC 3339 text with millisecond precision in UTC
//! (`2024-05-01T10:00:00.000Z`), so lexical order matches time order and range
//! queries can use the `created_at` index directly.

use anyhow::{bail, Context, Result};
use chrono::{Datelike, SecondsFormat};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::store::{new_post_id, validate_content, PostStore};
use super::types::{now_millis, to_datetime, Millis, Post};

pub struct SqlitePostStore {
    conn: Connection,
}

impl SqlitePostStore {
    /// Wrap a connection whose schema has already been initialized
    /// (see [`crate::db::open_database`]).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Format epoch milliseconds for storage. Only years 0000-9999 are accepted,
/// since anything wider breaks lexical ordering of the stored text.
fn to_db_time(ms: Millis) -> Result<String> {
    let dt = to_datetime(ms)
        .filter(|dt| (0..=9999).contains(&dt.year()))
        .with_context(|| format!("timestamp out of range: {ms}"))?;
    Ok(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Parse a stored timestamp. Unparseable values become NaN so the timeline
/// engine drops the post instead of failing the whole read.
fn from_db_time(id: &str, column: &str, raw: &str) -> Millis {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.timestamp_millis() as Millis,
        Err(e) => {
            tracing::warn!(post_id = %id, column, value = %raw, error = %e, "unparseable timestamp");
            f64::NAN
        }
    }
}

fn row_to_post(row: &Row<'_>) -> rusqlite::Result<Post> {
    let id: String = row.get(0)?;
    let content: String = row.get(1)?;
    let created_raw: String = row.get(2)?;
    let updated_raw: String = row.get(3)?;
    let created_at = from_db_time(&id, "created_at", &created_raw);
    let updated_at = from_db_time(&id, "updated_at", &updated_raw);
    Ok(Post {
        id,
        created_at,
        updated_at,
        content,
    })
}

impl PostStore for SqlitePostStore {
    fn all_posts(&self) -> Result<Vec<Post>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, content, created_at, updated_at FROM posts ORDER BY rowid")?;
        let posts = stmt
            .query_map([], row_to_post)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    fn posts_in_range(&self, start: Millis, end: Millis) -> Result<Vec<Post>> {
        let start = to_db_time(start)?;
        let end = to_db_time(end)?;
        let mut stmt = self.conn.prepare(
            "SELECT id, content, created_at, updated_at FROM posts \
             WHERE created_at >= ?1 AND created_at <= ?2 ORDER BY created_at",
        )?;
        let posts = stmt
            .query_map(params![start, end], row_to_post)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    fn get_post(&self, id: &str) -> Result<Option<Post>> {
        let post = self
            .conn
            .query_row(
                "SELECT id, content, created_at, updated_at FROM posts WHERE id = ?1",
                params![id],
                row_to_post,
            )
            .optional()?;
        Ok(post)
    }

    fn create_post(&mut self, content: &str, created_at: Option<Millis>) -> Result<Post> {
        validate_content(content)?;
        // Storage keeps whole milliseconds; return exactly what a reload yields.
        let created_at = created_at.unwrap_or_else(now_millis).round();
        let stamp = to_db_time(created_at)?;
        let post = Post::new(new_post_id(), created_at, content);
        self.conn
            .execute(
                "INSERT INTO posts (id, content, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
                params![post.id, post.content, stamp],
            )
            .context("failed to insert post")?;

        tracing::info!(post_id = %post.id, created_at = %stamp, "post created");
        Ok(post)
    }

    fn update_post(&mut self, id: &str, content: &str) -> Result<Post> {
        validate_content(content)?;
        let Some(existing) = self.get_post(id)? else {
            bail!("post not found: {id}");
        };

        // Millisecond storage precision: keep updated_at strictly increasing.
        let previous = if existing.updated_at.is_finite() {
            existing.updated_at
        } else {
            0.0
        };
        let updated_at = now_millis().round().max(previous + 1.0);
        self.conn.execute(
            "UPDATE posts SET content = ?1, updated_at = ?2 WHERE id = ?3",
            params![content, to_db_time(updated_at)?, id],
        )?;

        tracing::info!(post_id = %id, "post updated");
        Ok(Post {
            content: content.to_string(),
            updated_at,
            ..existing
        })
    }

    fn delete_post(&mut self, id: &str) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM posts WHERE id = ?1", params![id])?;
        if affected == 0 {
            bail!("post not found: {id}");
        }
        tracing::info!(post_id = %id, "post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn store() -> SqlitePostStore {
        SqlitePostStore::new(db::open_memory_database().unwrap())
    }

    #[test]
    fn create_then_read_back() {
        let mut store = store();
        let post = store.create_post("first entry", Some(1_714_557_600_000.0)).unwrap();

        let loaded = store.get_post(&post.id).unwrap().unwrap();
        assert_eq!(loaded, post);
        assert_eq!(store.all_posts().unwrap().len(), 1);
    }

    #[test]
    fn range_query_uses_time_order() {
        let mut store = store();
        let late = store.create_post("late", Some(3_000_000.0)).unwrap();
        let early = store.create_post("early", Some(1_000_000.0)).unwrap();
        store.create_post("outside", Some(9_000_000.0)).unwrap();

        let ids: Vec<String> = store
            .posts_in_range(0.0, 5_000_000.0)
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[test]
    fn corrupt_timestamp_loads_as_nan() {
        let store = store();
        store
            .connection()
            .execute(
                "INSERT INTO posts (id, content, created_at, updated_at) VALUES ('bad', 'x', 'not a date', 'not a date')",
                [],
            )
            .unwrap();

        let posts = store.all_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].created_at.is_nan());
    }

    #[test]
    fn timestamps_outside_four_digit_years_are_rejected() {
        let mut store = store();
        // Year 10000 and year -1.
        assert!(store.create_post("far future", Some(253_402_300_800_000.0)).is_err());
        assert!(store.create_post("far past", Some(-62_198_755_200_000.0)).is_err());
        assert!(store.create_post("edge", Some(253_402_300_799_999.0)).is_ok());
        assert_eq!(store.all_posts().unwrap().len(), 1);
    }

    #[test]
    fn update_and_delete() {
        let mut store = store();
        let post = store.create_post("draft", Some(1_000_000.0)).unwrap();

        let updated = store.update_post(&post.id, "final").unwrap();
        assert_eq!(updated.content, "final");
        assert!(updated.updated_at > post.updated_at);
        assert_eq!(store.get_post(&post.id).unwrap().unwrap().content, "final");

        store.delete_post(&post.id).unwrap();
        assert!(store.get_post(&post.id).unwrap().is_none());
        assert!(store.delete_post(&post.id).is_err());
    }
}
