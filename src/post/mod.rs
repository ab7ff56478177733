pub mod sqlite;
pub mod store;
pub mod types;

pub use sqlite::SqlitePostStore;
pub use store::{MemoryPostStore, PostStore};
pub use types::{Millis, Post, PostError};
