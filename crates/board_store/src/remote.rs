//! The remote document store abstraction.
//!
//! A store holds exactly one board document and supports two operations:
//! reading the latest version and replacing it wholesale. Implementations
//! must not attempt partial updates or conflict detection; last writer wins.

use crate::error::StoreResult;
use board_model::Document;
use std::sync::Arc;

/// Trait for remote document store backends.
///
/// Methods take `&self`; implementations use interior mutability where they
/// need state. Returned futures are `Send` so callers can drive them from
/// spawned tasks.
#[trait_variant::make(Send)]
pub trait DocumentStore: Send + Sync {
    /// Fetch the latest version of the board document.
    ///
    /// Fails with a transport error for unreachable stores and non-success
    /// statuses, and with a malformed error when the payload is unusable.
    async fn fetch_latest(&self) -> StoreResult<Document>;

    /// Replace the stored board document with `document`.
    async fn put_document(&self, document: &Document) -> StoreResult<()>;
}

impl<S: DocumentStore> DocumentStore for Arc<S> {
    async fn fetch_latest(&self) -> StoreResult<Document> {
        (**self).fetch_latest().await
    }

    async fn put_document(&self, document: &Document) -> StoreResult<()> {
        (**self).put_document(document).await
    }
}
