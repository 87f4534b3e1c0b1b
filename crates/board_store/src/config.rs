//! Connection settings for the HTTP document store

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header that carries the shared secret unless configured otherwise
pub const DEFAULT_ACCESS_KEY_HEADER: &str = "X-Master-Key";

/// Configuration for the remote document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteStoreConfig {
    /// Base URL of the store API, without a trailing slash
    pub base_url: String,
    /// Collection segment of the document path
    pub collection: String,
    /// Identifier of the board document
    pub document_id: String,
    /// Static shared secret sent with every request
    pub access_key: Option<String>,
    /// Header name used for the shared secret
    pub access_key_header: String,
    /// Transport-level request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RemoteStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.jsonbin.io/v3".to_string(),
            collection: "b".to_string(),
            document_id: String::new(),
            access_key: None,
            access_key_header: DEFAULT_ACCESS_KEY_HEADER.to_string(),
            timeout_secs: 30,
        }
    }
}

impl RemoteStoreConfig {
    /// Create a config for the given store location
    pub fn new(base_url: &str, collection: &str, document_id: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            collection: collection.to_string(),
            document_id: document_id.to_string(),
            ..Default::default()
        }
    }

    /// Set the shared secret
    pub fn with_access_key(mut self, key: impl Into<String>) -> Self {
        self.access_key = Some(key.into());
        self
    }

    /// Set the header name used for the shared secret
    pub fn with_access_key_header(mut self, header: impl Into<String>) -> Self {
        self.access_key_header = header.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// URL of the whole-document resource (`PUT`)
    pub fn document_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.collection,
            self.document_id
        )
    }

    /// URL of the latest-version resource (`GET`)
    pub fn latest_url(&self) -> String {
        format!("{}/latest", self.document_url())
    }

    /// Check that enough is configured to address a document
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url is empty".to_string());
        }
        if self.collection.trim().is_empty() {
            return Err("collection is empty".to_string());
        }
        if self.document_id.trim().is_empty() {
            return Err("document_id is empty".to_string());
        }
        if self.access_key_header.trim().is_empty() {
            return Err("access_key_header is empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RemoteStoreConfig::default();
        assert_eq!(config.access_key_header, DEFAULT_ACCESS_KEY_HEADER);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.access_key.is_none());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_urls() {
        let config = RemoteStoreConfig::new("https://store.example/v3/", "b", "board-1");
        assert_eq!(config.document_url(), "https://store.example/v3/b/board-1");
        assert_eq!(config.latest_url(), "https://store.example/v3/b/board-1/latest");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = RemoteStoreConfig::new("http://localhost", "c", "d")
            .with_access_key("secret")
            .with_access_key_header("X-Access-Key")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.access_key.as_deref(), Some("secret"));
        assert_eq!(config.access_key_header, "X-Access-Key");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RemoteStoreConfig =
            serde_json::from_str(r#"{"document_id": "abc"}"#).unwrap();
        assert_eq!(config.document_id, "abc");
        assert_eq!(config.collection, "b");
        assert_eq!(config.timeout_secs, 30);
    }
}
