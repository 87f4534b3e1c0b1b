//! Periodic pull-merge into a local view
//!
//! A [`PullLoop`] repeatedly asks the engine to merge the remote layout with
//! whatever the view currently shows, and hands the result back to the view
//! only when it actually differs.

use crate::engine::SyncEngine;
use board_model::{Item, LayoutDiff};
use board_store::DocumentStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A displayed layout the pull loop keeps up to date
pub trait LocalView: Send + Sync + 'static {
    /// Items currently shown
    fn snapshot(&self) -> Vec<Item>;

    /// Replace the shown items with a merged layout
    fn adopt(&self, items: Vec<Item>);
}

/// Run one pull-merge pass against `view`.
///
/// Returns the applied diff, or `None` if the merged layout matched the view.
pub async fn pull_once<S, V>(engine: &SyncEngine<S>, view: &V) -> Option<LayoutDiff>
where
    S: DocumentStore + 'static,
    V: LocalView + ?Sized,
{
    let local = view.snapshot();
    let merged = engine.sync_items(local.clone()).await;

    let diff = LayoutDiff::between(&local, &merged);
    if diff.is_empty() {
        return None;
    }

    tracing::debug!(changes = %diff.summary(), "adopting remote layout");
    view.adopt(merged);
    Some(diff)
}

/// Handle to a running pull loop. Dropping it stops the loop.
pub struct PullLoop {
    interval: Duration,
    handle: JoinHandle<()>,
}

impl PullLoop {
    /// Spawn a loop that pulls every `interval`, starting one interval from now
    pub fn spawn<S, V>(engine: SyncEngine<S>, view: Arc<V>, interval: Duration) -> Self
    where
        S: DocumentStore + 'static,
        V: LocalView,
    {
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                pull_once(&engine, view.as_ref()).await;
            }
        });

        tracing::info!(interval = ?interval, "pull loop started");
        Self { interval, handle }
    }

    /// Time between passes
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the loop is still running
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop the loop. A pass already waiting on the store is abandoned.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for PullLoop {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
