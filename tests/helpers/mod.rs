#![allow(dead_code)]

use diaryline::db;
use diaryline::post::types::{Millis, Post, MINUTE_MS};
use diaryline::post::SqlitePostStore;
use rusqlite::Connection;

/// 2024-05-01T10:00:00Z
pub const TEN_AM: Millis = 1_714_557_600_000.0;

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::schema::init_schema(&conn).unwrap();
    db::migrations::run_migrations(&conn).unwrap();
    conn
}

pub fn test_store() -> SqlitePostStore {
    SqlitePostStore::new(test_db())
}

/// A post `minutes` after 10:00.
pub fn post_at(id: &str, minutes: f64) -> Post {
    Post::new(id, TEN_AM + minutes * MINUTE_MS, format!("entry {id}"))
}

/// Deterministic scatter of `n` posts over roughly a day, in a shuffled order.
pub fn scattered_posts(n: usize) -> Vec<Post> {
    (0..n)
        .map(|i| {
            let minutes = ((i * 37 + 11) % 1440) as f64 + (i % 3) as f64 * 0.5;
            post_at(&format!("p{i:03}"), minutes)
        })
        .collect()
}
