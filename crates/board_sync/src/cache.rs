//! Local mirror of the remote board document

use board_model::{Document, Item, Version};

/// In-memory copy of the last-known remote document.
///
/// Absent until the first load; never persisted.
#[derive(Debug, Default)]
pub struct LocalCache {
    document: Option<Document>,
    last_known_version: Version,
}

impl LocalCache {
    /// Create an uninitialized cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a document has been loaded
    pub fn is_initialized(&self) -> bool {
        self.document.is_some()
    }

    /// The cached document, if any
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Mutable access to the cached document, if any
    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }

    /// Cached items, or an empty list before the first load
    pub fn items(&self) -> Vec<Item> {
        self.document
            .as_ref()
            .map(|doc| doc.items.clone())
            .unwrap_or_default()
    }

    /// Version of the last document read from or written to the store
    pub fn last_known_version(&self) -> Version {
        self.last_known_version
    }

    /// Replace the cache wholesale with a loaded document
    pub fn replace(&mut self, document: Document) {
        self.last_known_version = document.version;
        self.document = Some(document);
    }

    /// Record that `version` was successfully written
    pub fn record_written(&mut self, version: Version) {
        self.last_known_version = version;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninitialized_cache() {
        let cache = LocalCache::new();
        assert!(!cache.is_initialized());
        assert!(cache.items().is_empty());
        assert!(cache.document().is_none());
        assert_eq!(cache.last_known_version(), Version::initial());
    }

    #[test]
    fn test_replace_records_version() {
        let mut cache = LocalCache::new();
        let mut document = Document::with_items(vec![Item::new("a", "🎲", 0.0, 0.0)]);
        document.version = Version::new(6);

        cache.replace(document);

        assert!(cache.is_initialized());
        assert_eq!(cache.items().len(), 1);
        assert_eq!(cache.last_known_version(), Version::new(6));
    }

    #[test]
    fn test_record_written() {
        let mut cache = LocalCache::new();
        cache.replace(Document::empty());
        cache.record_written(Version::new(3));
        assert_eq!(cache.last_known_version(), Version::new(3));
    }
}
