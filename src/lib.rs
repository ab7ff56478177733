//! Diary timeline engine.
//!
//! Turns an unordered set of timestamped diary posts into what a timeline view
//! draws: a bounded time window, clustered markers placed on a 0–100% axis
//! without overlapping, and axis labels scaled to the window. Results are
//! memoized by post-set content, so re-rendering an unchanged diary is a cache
//! lookup.
//!
//! | Stage | Output | Cached |
//! |-------|--------|--------|
//! | Range | `[start, end]`, at least one hour wide | yes, by post set |
//! | Clusters + positions | markers in time order | yes, by post set + range |
//! | Labels | 15 min / hourly / daily ticks | no |
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`db`] — SQLite database initialization, schema, and migrations
//! - [`post`] — Post records and the [`post::PostStore`] seam (SQLite and in-memory)
//! - [`timeline`] — Range, clustering, positioning, labels, and the computation cache

pub mod config;
pub mod db;
pub mod post;
pub mod timeline;
