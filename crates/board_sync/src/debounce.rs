//! Cancellable debounced task scheduling.
//!
//! A [`Debouncer`] runs a task once a quiet period has elapsed since the last
//! call to [`Debouncer::schedule`]. Each call replaces the pending run and
//! restarts the quiet period, so a burst of calls results in one run.
//! [`Debouncer::cancel`] drops the pending run without executing it.
//!
//! Once the quiet period has elapsed the running task owns itself: a later
//! `schedule` or `cancel` no longer aborts it, it only affects the next run.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Default)]
struct Slot {
    /// Incremented on every schedule; identifies the pending run
    generation: u64,
    /// Handle of the pending (still sleeping) run
    handle: Option<JoinHandle<()>>,
}

/// Debounced scheduler for a single recurring task
pub struct Debouncer {
    delay: Duration,
    slot: Arc<Mutex<Slot>>,
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Debouncer {
    /// Create a debouncer with the given quiet period
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// The quiet period
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `task` to run after the quiet period, replacing any pending run.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F, Fut>(&self, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut slot = lock(&self.slot);
        if let Some(pending) = slot.handle.take() {
            pending.abort();
        }

        slot.generation += 1;
        let generation = slot.generation;
        let shared = Arc::clone(&self.slot);
        let delay = self.delay;

        slot.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            {
                let mut slot = lock(&shared);
                if slot.generation != generation {
                    return;
                }
                // Detach: from here on this run can no longer be aborted.
                slot.handle = None;
            }

            task().await;
        }));
    }

    /// Cancel the pending run, if any. Returns whether a run was pending.
    pub fn cancel(&self) -> bool {
        let mut slot = lock(&self.slot);
        slot.generation += 1;
        match slot.handle.take() {
            Some(pending) => {
                pending.abort();
                true
            }
            None => false,
        }
    }

    /// Whether a run is scheduled and still waiting out its quiet period
    pub fn is_pending(&self) -> bool {
        lock(&self.slot).handle.is_some()
    }
}
