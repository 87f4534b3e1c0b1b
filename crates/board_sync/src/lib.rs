//! Board Sync - Client-side synchronization for the shared board
//!
//! This crate keeps a local copy of the board document consistent with the
//! remote store. Edits are queued and coalesced, flushed after a quiet period
//! with an incremented version, and periodically reconciled with the remote
//! layout using a server-wins merge.
//!
//! The store offers no compare-and-swap, so concurrent clients can overwrite
//! each other's writes. The engine does not try to prevent that; the periodic
//! pull converges every client onto whatever the store holds last.

mod cache;
mod config;
mod debounce;
mod engine;
mod event;
mod merge;
mod pull;
mod queue;
mod status;

pub use cache::*;
pub use config::*;
pub use debounce::*;
pub use engine::*;
pub use event::*;
pub use merge::*;
pub use pull::*;
pub use queue::*;
pub use status::*;
