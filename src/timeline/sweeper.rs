//! Background purge of expired cache entries.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::engine::TimelineEngine;

/// Spawn a task that calls [`TimelineEngine::sweep_expired`] every `every`.
/// The task runs until the returned handle is aborted or the runtime stops.
pub fn spawn_sweeper(engine: Arc<TimelineEngine>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; there is nothing to sweep yet.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = engine.sweep_expired();
            tracing::debug!(removed, "cache sweep");
        }
    })
}
