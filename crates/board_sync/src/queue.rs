//! Pending operation queue.
//!
//! Mutations requested by the presentation layer are buffered here until the
//! next flush, which drains the whole queue at once and applies it to the
//! cached document in enqueue order.

use board_model::{Document, Item};
use std::collections::VecDeque;

/// A deferred mutation of the board document
#[derive(Clone, Debug, PartialEq)]
pub enum PendingOp {
    /// Insert an item, replacing any item with the same id
    Add(Item),
    /// Move an existing item; no-op if the id is absent
    Move { id: String, x: f64, y: f64 },
    /// Remove an item; no-op if the id is absent
    Remove { id: String },
}

impl PendingOp {
    /// Id of the item this operation targets
    pub fn item_id(&self) -> &str {
        match self {
            PendingOp::Add(item) => &item.id,
            PendingOp::Move { id, .. } | PendingOp::Remove { id } => id,
        }
    }

    /// Apply this operation to a document
    pub fn apply(&self, document: &mut Document) {
        match self {
            PendingOp::Add(item) => document.upsert(item.clone()),
            PendingOp::Move { id, x, y } => {
                document.move_item(id, *x, *y);
            }
            PendingOp::Remove { id } => {
                document.remove_item(id);
            }
        }
    }
}

/// FIFO buffer of pending operations
#[derive(Debug, Default)]
pub struct OperationQueue {
    ops: VecDeque<PendingOp>,
}

impl OperationQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation
    pub fn push(&mut self, op: PendingOp) {
        self.ops.push_back(op);
    }

    /// Number of queued operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Remove and return every queued operation, oldest first
    pub fn drain(&mut self) -> Vec<PendingOp> {
        self.ops.drain(..).collect()
    }

    /// Drop every queued operation, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let dropped = self.ops.len();
        self.ops.clear();
        dropped
    }

    /// Apply every queued operation to `document` without draining the queue
    pub fn apply_to(&self, document: &mut Document) {
        for op in &self.ops {
            op.apply(document);
        }
    }
}

/// Apply operations to a document in order
pub fn apply_all(document: &mut Document, ops: &[PendingOp]) {
    for op in ops {
        op.apply(document);
    }
}
