//! The remote-persisted board document

use crate::{Item, ModelError, Result, Version};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The single JSON aggregate persisted to the remote store: every item on the
/// board plus version and timestamp metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Items in board order
    pub items: Vec<Item>,
    /// Time of the last write
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
    /// Advisory write counter
    #[serde(default)]
    pub version: Version,
}

impl Document {
    /// An empty document at the initial version, stamped now
    pub fn empty() -> Self {
        Self::with_items(Vec::new())
    }

    /// A document at the initial version holding the given items
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items,
            last_updated: Utc::now(),
            version: Version::initial(),
        }
    }

    /// Number of items on the board
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the board has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find an item by id
    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether an item with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Insert an item, replacing (and moving to the end) any item with the same id
    pub fn upsert(&mut self, item: Item) {
        self.items.retain(|existing| existing.id != item.id);
        self.items.push(item);
    }

    /// Move the item with the given id. Returns false if no such item exists.
    pub fn move_item(&mut self, id: &str, x: f64, y: f64) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.move_to(x, y);
                true
            }
            None => false,
        }
    }

    /// Remove the item with the given id. Returns false if no such item exists.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Tag the document with a new version and the current time
    pub fn stamp(&mut self, version: Version) {
        self.version = version;
        self.last_updated = Utc::now();
    }

    /// Check the document invariants: version >= 1, ids non-empty and unique,
    /// positions finite.
    pub fn validate(&self) -> Result<()> {
        if !self.version.is_valid() {
            return Err(ModelError::InvalidVersion(self.version.value()));
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for (index, item) in self.items.iter().enumerate() {
            if item.id.is_empty() {
                return Err(ModelError::EmptyItemId(index));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(ModelError::DuplicateItemId(item.id.clone()));
            }
            if !item.has_finite_position() {
                return Err(ModelError::NonFinitePosition {
                    id: item.id.clone(),
                    x: item.x,
                    y: item.y,
                });
            }
        }

        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}
