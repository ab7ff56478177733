pub mod posts;
pub mod timeline;

use anyhow::Result;

use diaryline::config::DiaryConfig;
use diaryline::post::types::{parse_timestamp, Millis, Post};
use diaryline::post::{PostStore, SqlitePostStore};

/// Open-ended range bounds: the Unix epoch and 9999-12-31T23:59:59.999Z.
const EARLIEST: Millis = 0.0;
const LATEST: Millis = 253_402_300_799_999.0;

/// Open the configured SQLite store.
pub fn open_store(config: &DiaryConfig) -> Result<SqlitePostStore> {
    let db_path = config.resolved_db_path();
    let conn = diaryline::db::open_database(&db_path)?;
    Ok(SqlitePostStore::new(conn))
}

/// Parse an optional RFC 3339 bound from the command line.
pub fn parse_bound(raw: Option<&str>) -> Result<Option<Millis>> {
    Ok(raw.map(parse_timestamp).transpose()?)
}

/// All posts, or only those between the given bounds when either is set.
pub fn load_posts(store: &impl PostStore, from: Option<&str>, to: Option<&str>) -> Result<Vec<Post>> {
    let from = parse_bound(from)?;
    let to = parse_bound(to)?;
    if from.is_none() && to.is_none() {
        return store.all_posts();
    }
    store.posts_in_range(from.unwrap_or(EARLIEST), to.unwrap_or(LATEST))
}
