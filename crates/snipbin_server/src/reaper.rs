//! Periodic removal of expired snippets for stores without native key expiry.

use snipbin_core::SnippetStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Run one purge on the blocking pool.
///
/// # Returns
/// Number of records removed, or 0 when the pass failed.
pub async fn purge_once(store: Arc<dyn SnippetStore>) -> usize {
    match tokio::task::spawn_blocking(move || store.purge_expired()).await {
        Ok(Ok(removed)) => {
            if removed > 0 {
                tracing::info!("Reaper removed {} expired snippet(s)", removed);
            }
            removed
        }
        Ok(Err(err)) => {
            tracing::error!("Reaper pass failed: {}", err);
            0
        }
        Err(err) => {
            tracing::error!("Reaper task did not complete: {}", err);
            0
        }
    }
}

/// Spawn a task that purges expired snippets every `interval`.
///
/// The first pass runs immediately. Abort the returned handle to stop it.
pub fn spawn_reaper(store: Arc<dyn SnippetStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            purge_once(store.clone()).await;
        }
    })
}
