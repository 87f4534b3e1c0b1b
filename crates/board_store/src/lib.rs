//! Board Store - Access to the remote board document
//!
//! The remote store is a key-addressed JSON blob store that only knows how to
//! return the latest document and how to replace it wholesale. It offers no
//! partial updates, no compare-and-swap and no change notifications.
//!
//! # Modules
//!
//! - [`remote`]: the [`DocumentStore`] trait every backend implements
//! - [`http`]: HTTP backend speaking the `GET .../latest` / `PUT` protocol
//! - [`memory`]: in-process backend for development and tests
//! - [`config`]: connection settings for the HTTP backend
//! - [`error`]: store error taxonomy
//!
//! # Example
//!
//! ```ignore
//! use board_store::{DocumentStore, HttpDocumentStore, RemoteStoreConfig};
//!
//! let config = RemoteStoreConfig::new("https://api.example.com/v3", "b", "board-1")
//!     .with_access_key("secret");
//! let store = HttpDocumentStore::new(config)?;
//! let document = store.fetch_latest().await?;
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod remote;

pub use config::{RemoteStoreConfig, DEFAULT_ACCESS_KEY_HEADER};
pub use error::{StoreError, StoreResult};
pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;
pub use remote::DocumentStore;
