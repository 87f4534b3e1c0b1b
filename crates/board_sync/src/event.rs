//! Sync outcomes and the events published to observers

use board_model::Version;

/// Why a flush did nothing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Another flush is still waiting on the store
    InFlight,
    /// No operations are queued
    NothingPending,
    /// No document has been loaded yet
    Uninitialized,
}

/// Result of a single flush attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlushOutcome {
    /// The document was written at `version`, carrying `ops` queued operations
    Written { version: Version, ops: usize },
    /// Nothing was written
    Skipped(SkipReason),
    /// The write failed; the `dropped_ops` operations stay applied locally only
    Failed { error: String, dropped_ops: usize },
}

impl FlushOutcome {
    /// Whether the flush reached the store successfully
    pub fn is_written(&self) -> bool {
        matches!(self, FlushOutcome::Written { .. })
    }
}

/// Notifications published by the sync engine.
///
/// These carry the eventual outcome of work that was acknowledged to the
/// caller before it reached the store.
#[derive(Clone, Debug, PartialEq)]
pub enum SyncEvent {
    /// A document was loaded from the store
    Loaded { version: Version, items: usize },
    /// Loading failed and an empty board was substituted
    LoadFailed { error: String },
    /// Queued operations were written
    Flushed { version: Version, ops: usize },
    /// A flush failed; its operations will not be retried
    FlushFailed { error: String, dropped_ops: usize },
    /// A pull-merge produced a layout
    Merged { version: Version, items: usize },
    /// The board was reset; observers should clear their view
    Reset,
}
