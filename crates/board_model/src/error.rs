//! Error types for board model validation

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Invalid document version: {0}")]
    InvalidVersion(u64),

    #[error("Item has an empty id at index {0}")]
    EmptyItemId(usize),

    #[error("Duplicate item id: {0}")]
    DuplicateItemId(String),

    #[error("Item {id} has a non-finite position ({x}, {y})")]
    NonFinitePosition { id: String, x: f64, y: f64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
