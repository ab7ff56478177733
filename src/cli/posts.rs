//! CLI commands that write or list posts.

use anyhow::{Context, Result};

use diaryline::config::DiaryConfig;
use diaryline::post::types::{format_timestamp, parse_timestamp};
use diaryline::post::PostStore;

use super::{load_posts, open_store};

/// Longest content preview shown by `list`.
const PREVIEW_CHARS: usize = 60;

pub fn add(config: &DiaryConfig, content: &str, at: Option<&str>) -> Result<()> {
    let created_at = at.map(parse_timestamp).transpose()?;
    let mut store = open_store(config)?;
    let post = store
        .create_post(content, created_at)
        .context("failed to create post")?;
    println!("{}  {}", post.id, format_timestamp(post.created_at));
    Ok(())
}

pub fn list(config: &DiaryConfig, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let store = open_store(config)?;
    let posts = load_posts(&store, from, to)?;

    if posts.is_empty() {
        println!("No posts.");
        return Ok(());
    }

    for post in &posts {
        println!(
            "{}  {}  {}",
            post.id,
            format_timestamp(post.created_at),
            preview(&post.content)
        );
    }
    println!();
    println!("{} post(s)", posts.len());
    Ok(())
}

pub fn edit(config: &DiaryConfig, id: &str, content: &str) -> Result<()> {
    let mut store = open_store(config)?;
    let post = store.update_post(id, content)?;
    println!("Updated {} at {}", post.id, format_timestamp(post.updated_at));
    Ok(())
}

pub fn remove(config: &DiaryConfig, id: &str) -> Result<()> {
    let mut store = open_store(config)?;
    store.delete_post(id)?;
    println!("Removed {id}");
    Ok(())
}

/// First line of `content`, cut to [`PREVIEW_CHARS`] characters.
fn preview(content: &str) -> String {
    let line = content.lines().next().unwrap_or_default();
    if line.chars().count() <= PREVIEW_CHARS {
        line.to_string()
    } else {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_long_first_line() {
        let long = "x".repeat(100);
        assert_eq!(preview(&long).len(), PREVIEW_CHARS + 3);
        assert_eq!(preview("short\nsecond line"), "short");
    }
}
