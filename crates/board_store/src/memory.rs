//! In-memory document store implementation.
//!
//! `MemoryDocumentStore` keeps the board document in process memory. It is
//! intended for development, tests and offline demos where persistence across
//! restarts is not required.
//!
//! # Features
//!
//! - Request counters for reads and writes
//! - A log of every successfully written document
//! - Failure injection (offline reads and/or writes)
//! - Artificial latency, to hold a request in flight
//!
//! # Example
//!
//! ```ignore
//! use board_store::{DocumentStore, MemoryDocumentStore};
//!
//! let store = MemoryDocumentStore::new();
//! store.put_document(&document).await?;
//! assert_eq!(store.put_count(), 1);
//! ```

use crate::error::{StoreError, StoreResult};
use crate::remote::DocumentStore;
use board_model::Document;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Mutable state behind the store lock
#[derive(Default)]
struct StoreState {
    /// Current document, `None` if the document does not exist
    document: Option<Document>,
    /// Every successfully written document, oldest first
    writes: Vec<Document>,
    /// Latency applied to reads
    fetch_delay: Option<Duration>,
    /// Latency applied to writes
    put_delay: Option<Duration>,
}

/// In-memory implementation of `DocumentStore`
#[derive(Default)]
pub struct MemoryDocumentStore {
    state: Mutex<StoreState>,
    get_count: AtomicUsize,
    put_count: AtomicUsize,
    fail_gets: AtomicBool,
    fail_puts: AtomicBool,
}

impl MemoryDocumentStore {
    /// Create a store holding an empty document
    pub fn new() -> Self {
        Self::with_document(Document::empty())
    }

    /// Create a store holding the given document
    pub fn with_document(document: Document) -> Self {
        let store = Self::default();
        store.lock().document = Some(document);
        store
    }

    /// Create a store whose document does not exist yet; reads fail with 404
    pub fn missing() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a copy of the stored document
    pub fn document(&self) -> Option<Document> {
        self.lock().document.clone()
    }

    /// Replace the stored document directly, as another client would
    pub fn replace_document(&self, document: Document) {
        self.lock().document = Some(document);
    }

    /// All successfully written documents, oldest first
    pub fn writes(&self) -> Vec<Document> {
        self.lock().writes.clone()
    }

    /// Number of read requests received
    pub fn get_count(&self) -> usize {
        self.get_count.load(Ordering::SeqCst)
    }

    /// Number of write requests received, including failed ones
    pub fn put_count(&self) -> usize {
        self.put_count.load(Ordering::SeqCst)
    }

    /// Make reads fail with a transport error
    pub fn set_fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    /// Make writes fail with a transport error
    pub fn set_fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Make both reads and writes fail
    pub fn set_offline(&self, offline: bool) {
        self.set_fail_gets(offline);
        self.set_fail_puts(offline);
    }

    /// Delay every read by `delay`
    pub fn set_fetch_delay(&self, delay: Option<Duration>) {
        self.lock().fetch_delay = delay;
    }

    /// Delay every write by `delay`
    pub fn set_put_delay(&self, delay: Option<Duration>) {
        self.lock().put_delay = delay;
    }
}

impl DocumentStore for MemoryDocumentStore {
    async fn fetch_latest(&self) -> StoreResult<Document> {
        self.get_count.fetch_add(1, Ordering::SeqCst);

        let delay = self.lock().fetch_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("store unreachable".to_string()));
        }

        self.lock().document.clone().ok_or(StoreError::Status {
            status: 404,
            url: "memory://document".to_string(),
        })
    }

    async fn put_document(&self, document: &Document) -> StoreResult<()> {
        self.put_count.fetch_add(1, Ordering::SeqCst);

        let delay = self.lock().put_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("store unreachable".to_string()));
        }

        let mut state = self.lock();
        state.document = Some(document.clone());
        state.writes.push(document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_model::{Item, Version};

    #[tokio::test]
    async fn test_new_store_holds_empty_document() {
        let store = MemoryDocumentStore::new();
        let document = store.fetch_latest().await.unwrap();
        assert!(document.is_empty());
        assert_eq!(document.version, Version::initial());
        assert_eq!(store.get_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_document() {
        let store = MemoryDocumentStore::missing();
        let err = store.fetch_latest().await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_put_then_fetch() {
        let store = MemoryDocumentStore::new();
        let mut document = Document::with_items(vec![Item::new("a", "🎲", 1.0, 2.0)]);
        document.stamp(Version::new(2));

        store.put_document(&document).await.unwrap();

        assert_eq!(store.put_count(), 1);
        assert_eq!(store.writes().len(), 1);
        assert_eq!(store.fetch_latest().await.unwrap(), document);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryDocumentStore::new();
        store.set_offline(true);

        assert!(store.fetch_latest().await.unwrap_err().is_transport());
        assert!(store.put_document(&Document::empty()).await.unwrap_err().is_transport());
        assert_eq!(store.put_count(), 1);
        assert!(store.writes().is_empty());

        store.set_offline(false);
        assert!(store.put_document(&Document::empty()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_delay() {
        let store = MemoryDocumentStore::new();
        store.set_put_delay(Some(Duration::from_secs(3)));

        let start = tokio::time::Instant::now();
        store.put_document(&Document::empty()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_replace_document() {
        let store = MemoryDocumentStore::new();
        let document = Document::with_items(vec![Item::new("a", "🎲", 0.0, 0.0)]);
        store.replace_document(document.clone());

        assert_eq!(store.document(), Some(document));
        assert!(store.writes().is_empty());
    }
}
