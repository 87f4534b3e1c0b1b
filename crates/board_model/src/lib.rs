//! Board Model - Items, documents and versions for the shared tabletop
//!
//! This crate provides the data model that is persisted to the remote
//! document store: placeable [`Item`]s, the [`Document`] aggregate that holds
//! them together with version metadata, and [`LayoutDiff`] for comparing two
//! item layouts.

mod item;
mod document;
mod version;
mod diff;
mod error;

pub use item::*;
pub use document::*;
pub use version::*;
pub use diff::*;
pub use error::*;
