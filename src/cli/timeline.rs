//! CLI commands that render the timeline in the terminal.

use anyhow::{bail, Result};
use std::sync::Arc;
use std::time::Duration;

use diaryline::config::DiaryConfig;
use diaryline::post::types::format_timestamp;
use diaryline::post::PostStore;
use diaryline::timeline::{marker_for_post, spawn_sweeper, TimelineEngine, TimelineView};

use super::{load_posts, open_store};

/// Width of the drawn axis in terminal columns.
const AXIS_WIDTH: usize = 72;

pub fn timeline(config: &DiaryConfig, from: Option<&str>, to: Option<&str>, json: bool) -> Result<()> {
    let store = open_store(config)?;
    let posts = load_posts(&store, from, to)?;
    let engine = TimelineEngine::new(config.timeline_config());
    let view = engine.view(&posts);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render(&view));
    }
    Ok(())
}

pub fn marker(config: &DiaryConfig, post_id: &str) -> Result<()> {
    let store = open_store(config)?;
    if store.get_post(post_id)?.is_none() {
        bail!("post not found: {post_id}");
    }

    let posts = store.all_posts()?;
    let engine = TimelineEngine::new(config.timeline_config());
    let view = engine.view(&posts);

    match marker_for_post(&view.markers, post_id) {
        Some(m) => {
            println!("Marker at {:.1}%  ({})", m.position, format_timestamp(m.representative_time));
            for id in &m.post_ids {
                let tag = if id == post_id { "*" } else { " " };
                println!("  {tag} {id}");
            }
        }
        None => println!("Post {post_id} has no marker (invalid timestamp)"),
    }
    Ok(())
}

/// Re-render every `every_secs` until Ctrl-C, sharing one engine so unchanged
/// post sets are served from cache.
pub async fn watch(config: &DiaryConfig, every_secs: u64) -> Result<()> {
    let timeline_config = config.timeline_config();
    let engine = Arc::new(TimelineEngine::new(timeline_config));
    let sweep_every = Duration::from_millis(timeline_config.sweep_interval.max(1.0) as u64);
    let sweeper = spawn_sweeper(engine.clone(), sweep_every);

    let store = open_store(config)?;
    let mut ticker = tokio::time::interval(Duration::from_secs(every_secs.max(1)));

    tracing::info!(every_secs, "watching timeline, Ctrl-C to stop");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let posts = store.all_posts()?;
                let view = engine.view(&posts);
                println!("{}", render(&view));
                let stats = engine.stats();
                tracing::debug!(
                    range_hits = stats.ranges.hits,
                    marker_hits = stats.markers.hits,
                    "render complete"
                );
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("stopping watch");
                break;
            }
        }
    }

    sweeper.abort();
    Ok(())
}

/// Draw the range header, an axis with marker counts, labels under the
/// axis, and a marker listing.
fn render(view: &TimelineView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Timeline {} .. {}\n",
        format_timestamp(view.range.start),
        format_timestamp(view.range.end)
    ));
    out.push_str(&format!("{}\n", "=".repeat(AXIS_WIDTH)));

    let mut axis = vec!['-'; AXIS_WIDTH];
    for m in &view.markers {
        let col = column(m.position);
        axis[col] = match m.len() {
            n @ 1..=9 => char::from_digit(n as u32, 10).unwrap_or('+'),
            _ => '+',
        };
    }
    out.extend(axis.iter());
    out.push('\n');

    let mut label_line = vec![' '; AXIS_WIDTH];
    let mut next_free = 0;
    for label in &view.labels {
        let col = column(label.position);
        let len = label.text.chars().count();
        if col < next_free || col + len > AXIS_WIDTH {
            continue;
        }
        for (i, ch) in label.text.chars().enumerate() {
            label_line[col + i] = ch;
        }
        next_free = col + len + 1;
    }
    let labels: String = label_line.into_iter().collect();
    out.push_str(labels.trim_end());
    out.push_str("\n\n");

    if view.markers.is_empty() {
        out.push_str("No markers.\n");
    }
    for m in &view.markers {
        out.push_str(&format!(
            "{:>6.1}%  {}  {} post(s)\n",
            m.position,
            format_timestamp(m.representative_time),
            m.len()
        ));
    }
    out
}

fn column(position: f64) -> usize {
    let col = (position / 100.0 * (AXIS_WIDTH - 1) as f64).round();
    (col.max(0.0) as usize).min(AXIS_WIDTH - 1)
}
