//! Sync engine for the shared board document.
//!
//! The engine reconciles local edits with a remote store that only supports
//! whole-document reads and writes. It handles:
//!
//! - Loading the remote document into a local cache (with an empty fallback)
//! - Queuing add/move/remove operations and coalescing bursts into one write
//! - Flushing: applying queued operations, bumping the version, writing the document
//! - Pull-merge: folding the remote layout into a caller's view, server wins
//! - Resetting the board
//!
//! Construct one engine at startup and hand clones to whoever needs it; clones
//! share all state. At most one flush is in flight at a time. Store failures
//! never surface as errors here: loads and merges degrade, flushes report a
//! boolean or [`FlushOutcome`], and details go to [`SyncEvent`] observers.

use crate::cache::LocalCache;
use crate::config::SyncConfig;
use crate::debounce::Debouncer;
use crate::event::{FlushOutcome, SkipReason, SyncEvent};
use crate::merge::merge_server_wins;
use crate::pull::{LocalView, PullLoop};
use crate::queue::{apply_all, OperationQueue, PendingOp};
use crate::status::SyncStatus;
use board_model::{Document, Item};
use board_store::{DocumentStore, StoreError, StoreResult};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Mutable engine state. Never held across an await point.
#[derive(Default)]
struct EngineState {
    cache: LocalCache,
    queue: OperationQueue,
    last_flush_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

struct Shared<S> {
    store: S,
    config: SyncConfig,
    state: Mutex<EngineState>,
    flush_in_flight: AtomicBool,
    debouncer: Debouncer,
    events: broadcast::Sender<SyncEvent>,
}

/// Holds the single-flush flag for the duration of a flush
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Client-side sync engine over a [`DocumentStore`]
pub struct SyncEngine<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for SyncEngine<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: DocumentStore + 'static> SyncEngine<S> {
    /// Create an engine over `store`. The cache starts uninitialized.
    pub fn new(store: S, config: SyncConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            shared: Arc::new(Shared {
                store,
                debouncer: Debouncer::new(config.debounce()),
                config,
                state: Mutex::new(EngineState::default()),
                flush_in_flight: AtomicBool::new(false),
                events,
            }),
        }
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.shared.store
    }

    /// Get the configuration
    pub fn config(&self) -> &SyncConfig {
        &self.shared.config
    }

    /// Subscribe to sync events
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.shared.events.subscribe()
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: SyncEvent) {
        // No receivers is fine.
        let _ = self.shared.events.send(event);
    }

    // ========== Loading ==========

    /// Load the latest document and return its items
    pub async fn load_items(&self) -> Vec<Item> {
        self.load().await.items
    }

    /// Load the latest document into the cache.
    ///
    /// On any failure the cache is replaced by an empty document at the
    /// initial version, which is also returned.
    pub async fn load(&self) -> Document {
        match self.shared.store.fetch_latest().await {
            Ok(document) => {
                debug!(
                    version = document.version.value(),
                    items = document.len(),
                    "loaded board document"
                );
                {
                    let mut state = self.state();
                    state.cache.replace(document.clone());
                    state.last_error = None;
                }
                self.emit(SyncEvent::Loaded {
                    version: document.version,
                    items: document.len(),
                });
                document
            }
            Err(error) => {
                warn!(error = %error, "failed to load board document, using empty board");
                let document = Document::empty();
                {
                    let mut state = self.state();
                    state.cache.replace(document.clone());
                    state.last_error = Some(error.to_string());
                }
                self.emit(SyncEvent::LoadFailed {
                    error: error.to_string(),
                });
                document
            }
        }
    }

    async fn ensure_loaded(&self) {
        let initialized = self.state().cache.is_initialized();
        if !initialized {
            self.load().await;
        }
    }

    /// Cached items, or an empty list before the first load
    pub fn current_items(&self) -> Vec<Item> {
        self.state().cache.items()
    }

    /// Cached items with all pending operations applied
    pub fn projected_items(&self) -> Vec<Item> {
        let state = self.state();
        let mut document = state.cache.document().cloned().unwrap_or_default();
        state.queue.apply_to(&mut document);
        document.items
    }

    // ========== Operations ==========

    /// Queue an operation and restart the flush quiet period.
    ///
    /// Loads the document first if the cache is still empty.
    pub async fn enqueue(&self, op: PendingOp) {
        self.ensure_loaded().await;

        let pending = {
            let mut state = self.state();
            state.queue.push(op);
            state.queue.len()
        };
        debug!(pending, "queued board operation");

        let engine = self.clone();
        self.shared.debouncer.schedule(move || async move {
            engine.flush().await;
        });
    }

    /// Add an item, replacing any item with the same id.
    ///
    /// Always acknowledges; the write outcome arrives as a [`SyncEvent`].
    pub async fn add_item(&self, item: Item) -> bool {
        self.enqueue(PendingOp::Add(item)).await;
        true
    }

    /// Move an item. Unknown ids are ignored when the queue is applied.
    pub async fn update_item(&self, id: &str, x: f64, y: f64) -> bool {
        self.enqueue(PendingOp::Move {
            id: id.to_string(),
            x,
            y,
        })
        .await;
        true
    }

    /// Remove an item and write immediately.
    ///
    /// Returns whether the write succeeded.
    pub async fn remove_item(&self, id: &str) -> bool {
        self.enqueue(PendingOp::Remove { id: id.to_string() }).await;
        self.force_flush().await
    }

    /// Number of operations waiting for the next flush
    pub fn pending_count(&self) -> usize {
        self.state().queue.len()
    }

    // ========== Flushing ==========

    /// Cancel the pending quiet period and flush now.
    ///
    /// Returns true iff the document was written.
    pub async fn force_flush(&self) -> bool {
        self.shared.debouncer.cancel();
        self.flush().await.is_written()
    }

    /// Apply all queued operations to the cache and write the document.
    ///
    /// Does nothing while another flush is in flight, when nothing is queued
    /// or before the first load. A failed write is not retried and its
    /// operations are not re-queued.
    pub async fn flush(&self) -> FlushOutcome {
        let Some(_in_flight) = InFlightGuard::acquire(&self.shared.flush_in_flight) else {
            debug!("flush already in flight, skipping");
            return FlushOutcome::Skipped(SkipReason::InFlight);
        };

        let (document, ops) = {
            let mut guard = self.state();
            let state = &mut *guard;

            if state.queue.is_empty() {
                return FlushOutcome::Skipped(SkipReason::NothingPending);
            }

            let version = state.cache.last_known_version().next();
            let Some(document) = state.cache.document_mut() else {
                return FlushOutcome::Skipped(SkipReason::Uninitialized);
            };

            let ops = state.queue.drain();
            apply_all(document, &ops);
            document.stamp(version);
            (document.clone(), ops.len())
        };

        match self.write(&document).await {
            Ok(()) => {
                {
                    let mut state = self.state();
                    state.cache.record_written(document.version);
                    state.last_flush_at = Some(Utc::now());
                    state.last_error = None;
                }
                info!(version = document.version.value(), ops, "flushed board document");
                self.emit(SyncEvent::Flushed {
                    version: document.version,
                    ops,
                });
                FlushOutcome::Written {
                    version: document.version,
                    ops,
                }
            }
            Err(error) => {
                warn!(error = %error, dropped_ops = ops, "flush failed, operations dropped");
                self.state().last_error = Some(error.to_string());
                self.emit(SyncEvent::FlushFailed {
                    error: error.to_string(),
                    dropped_ops: ops,
                });
                FlushOutcome::Failed {
                    error: error.to_string(),
                    dropped_ops: ops,
                }
            }
        }
    }

    /// Write a document, bounded by the configured flush timeout
    async fn write(&self, document: &Document) -> StoreResult<()> {
        let put = self.shared.store.put_document(document);
        match self.shared.config.flush_timeout() {
            Some(limit) => match tokio::time::timeout(limit, put).await {
                Ok(result) => result,
                Err(_) => Err(StoreError::timeout(limit)),
            },
            None => put.await,
        }
    }

    // ========== Pull-merge ==========

    /// Merge the latest remote layout with `local`, server wins.
    ///
    /// Remote items come first; local items with ids unknown to the server are
    /// appended. On failure `local` is returned unchanged.
    pub async fn sync_items(&self, local: Vec<Item>) -> Vec<Item> {
        match self.shared.store.fetch_latest().await {
            Ok(document) => {
                let version = document.version;
                let merged = merge_server_wins(document.items.clone(), &local);
                {
                    let mut state = self.state();
                    state.cache.replace(document);
                    state.last_error = None;
                }
                debug!(version = version.value(), items = merged.len(), "merged remote layout");
                self.emit(SyncEvent::Merged {
                    version,
                    items: merged.len(),
                });
                merged
            }
            Err(error) => {
                warn!(error = %error, "pull-merge failed, keeping local layout");
                self.state().last_error = Some(error.to_string());
                local
            }
        }
    }

    /// Start a pull loop feeding `view` at the configured interval
    pub fn spawn_pull_loop<V: LocalView>(&self, view: Arc<V>) -> PullLoop {
        PullLoop::spawn(self.clone(), view, self.shared.config.pull_interval())
    }

    // ========== Reset & lifecycle ==========

    /// Clear the remote board and all local state immediately.
    ///
    /// Pending operations are discarded. Observers receive
    /// [`SyncEvent::Reset`] whether or not the remote write succeeded.
    pub async fn reset_all(&self) {
        self.shared.debouncer.cancel();

        let document = Document::empty();
        let dropped = {
            let mut state = self.state();
            state.cache.replace(document.clone());
            state.queue.clear()
        };

        match self.write(&document).await {
            Ok(()) => {
                info!(dropped_ops = dropped, "board reset");
                self.state().last_error = None;
            }
            Err(error) => {
                warn!(error = %error, "failed to reset remote board");
                self.state().last_error = Some(error.to_string());
            }
        }

        self.emit(SyncEvent::Reset);
    }

    /// Current status snapshot
    pub fn status(&self) -> SyncStatus {
        let state = self.state();
        SyncStatus {
            initialized: state.cache.is_initialized(),
            pending_ops: state.queue.len(),
            flush_in_flight: self.shared.flush_in_flight.load(Ordering::SeqCst),
            last_known_version: state.cache.last_known_version(),
            last_flush_at: state.last_flush_at,
            last_error: state.last_error.clone(),
        }
    }

    /// Stop the quiet-period timer and flush whatever is still queued
    pub async fn shutdown(&self) -> FlushOutcome {
        self.shared.debouncer.cancel();
        let outcome = self.flush().await;
        info!(?outcome, "sync engine shut down");
        outcome
    }
}
