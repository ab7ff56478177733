//! The [`PostStore`] seam between persistence and the timeline engine, plus an
//! in-memory implementation.

use anyhow::{bail, Result};

use super::types::{now_millis, Millis, Post, PostError};

/// Read/write access to diary posts.
///
/// The timeline engine only ever calls the read side; the write side backs the CLI.
pub trait PostStore {
    /// Every post, in storage order.
    fn all_posts(&self) -> Result<Vec<Post>>;

    /// Posts with `start <= created_at <= end`, ordered by `created_at`.
    fn posts_in_range(&self, start: Millis, end: Millis) -> Result<Vec<Post>>;

    /// A single post, or `None` if no post has this id.
    fn get_post(&self, id: &str) -> Result<Option<Post>>;

    /// Create a post at `created_at` (now if `None`). Returns the stored record.
    fn create_post(&mut self, content: &str, created_at: Option<Millis>) -> Result<Post>;

    /// Replace a post's content and bump `updated_at`.
    fn update_post(&mut self, id: &str, content: &str) -> Result<Post>;

    /// Remove a post. Fails if it does not exist.
    fn delete_post(&mut self, id: &str) -> Result<()>;
}

/// Reject blank content before it reaches storage.
pub(crate) fn validate_content(content: &str) -> Result<(), PostError> {
    if content.trim().is_empty() {
        return Err(PostError::EmptyContent);
    }
    Ok(())
}

/// Fresh UUID v7 post id.
pub(crate) fn new_post_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// `Vec`-backed store for tests and for callers that hold posts in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryPostStore {
    posts: Vec<Post>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing posts, kept in the given order.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self { posts }
    }
}

impl PostStore for MemoryPostStore {
    fn all_posts(&self) -> Result<Vec<Post>> {
        Ok(self.posts.clone())
    }

    fn posts_in_range(&self, start: Millis, end: Millis) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| p.created_at >= start && p.created_at <= end)
            .cloned()
            .collect();
        posts.sort_by(|a, b| a.created_at.total_cmp(&b.created_at));
        Ok(posts)
    }

    fn get_post(&self, id: &str) -> Result<Option<Post>> {
        Ok(self.posts.iter().find(|p| p.id == id).cloned())
    }

    fn create_post(&mut self, content: &str, created_at: Option<Millis>) -> Result<Post> {
        validate_content(content)?;
        let post = Post::new(
            new_post_id(),
            created_at.unwrap_or_else(now_millis),
            content,
        );
        self.posts.push(post.clone());
        Ok(post)
    }

    fn update_post(&mut self, id: &str, content: &str) -> Result<Post> {
        validate_content(content)?;
        let Some(post) = self.posts.iter_mut().find(|p| p.id == id) else {
            bail!("post not found: {id}");
        };
        post.content = content.to_string();
        // Keep updated_at strictly increasing so the cache key always changes.
        post.updated_at = now_millis().max(post.updated_at + 1.0);
        Ok(post.clone())
    }

    fn delete_post(&mut self, id: &str) -> Result<()> {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != id);
        if self.posts.len() == before {
            bail!("post not found: {id}");
        }
        Ok(())
    }
}
