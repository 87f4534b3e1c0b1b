//! HTTP document store backend.
//!
//! Speaks the JSON blob store protocol:
//!
//! - `GET {base}/{collection}/{document}/latest` returns `{ "record": Document }`
//! - `PUT {base}/{collection}/{document}` with the full document as body
//!
//! Any non-2xx status is a failure. The shared secret, when configured, is sent
//! in the configured header on every request.

use crate::config::RemoteStoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::remote::DocumentStore;
use board_model::Document;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

/// Response envelope of the latest-version endpoint
#[derive(Debug, Deserialize)]
struct LatestEnvelope {
    record: Document,
}

/// Remote document store reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    client: Client,
    config: RemoteStoreConfig,
}

impl HttpDocumentStore {
    /// Create a store client for the configured document
    pub fn new(config: RemoteStoreConfig) -> StoreResult<Self> {
        config.validate().map_err(StoreError::Config)?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the store configuration
    pub fn config(&self) -> &RemoteStoreConfig {
        &self.config
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.access_key {
            Some(ref key) => request.header(self.config.access_key_header.as_str(), key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> StoreResult<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }

    fn transport_error(&self, err: reqwest::Error) -> StoreError {
        if err.is_timeout() {
            StoreError::timeout(self.config.timeout())
        } else {
            err.into()
        }
    }
}

impl DocumentStore for HttpDocumentStore {
    async fn fetch_latest(&self) -> StoreResult<Document> {
        let url = self.config.latest_url();
        debug!(url = %url, "fetching latest board document");

        let response = self.send(self.client.get(&url), &url).await?;
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        let envelope: LatestEnvelope = serde_json::from_str(&body)?;
        envelope.record.validate()?;

        debug!(
            version = envelope.record.version.value(),
            items = envelope.record.len(),
            "fetched board document"
        );
        Ok(envelope.record)
    }

    async fn put_document(&self, document: &Document) -> StoreResult<()> {
        let url = self.config.document_url();
        debug!(
            url = %url,
            version = document.version.value(),
            items = document.len(),
            "writing board document"
        );

        self.send(self.client.put(&url).json(document), &url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_model::{Item, Version};
    use mockito::Matcher;

    const LATEST_BODY: &str = r##"{
        "record": {
            "items": [
                {"id": "a", "name": "Cat", "x": 10, "y": 20, "type": "emoji", "emoji": "🐱", "color": "#fff"}
            ],
            "lastUpdated": "2024-05-01T12:00:00Z",
            "version": 4
        },
        "metadata": {"id": "board-1", "private": true}
    }"##;

    fn store_for(server: &mockito::ServerGuard) -> HttpDocumentStore {
        let config = RemoteStoreConfig::new(&server.url(), "b", "board-1").with_access_key("secret");
        HttpDocumentStore::new(config).unwrap()
    }

    #[test]
    fn test_new_rejects_incomplete_config() {
        let result = HttpDocumentStore::new(RemoteStoreConfig::default());
        assert!(matches!(result, Err(StoreError::Config(_))));
    }

    #[tokio::test]
    async fn test_fetch_latest() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/b/board-1/latest")
            .match_header("x-master-key", "secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(LATEST_BODY)
            .create_async()
            .await;

        let store = store_for(&server);
        let document = store.fetch_latest().await.unwrap();

        mock.assert_async().await;
        assert_eq!(document.version, Version::new(4));
        assert_eq!(document.items.len(), 1);
        assert_eq!(document.items[0].emoji, "🐱");
        assert_eq!(document.items[0].color, "#fff");
    }

    #[tokio::test]
    async fn test_fetch_latest_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/b/board-1/latest")
            .with_status(404)
            .with_body(r#"{"message": "Bin not found"}"#)
            .create_async()
            .await;

        let store = store_for(&server);
        let err = store.fetch_latest().await.unwrap_err();

        assert!(matches!(err, StoreError::Status { status: 404, .. }));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_fetch_latest_missing_record() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/b/board-1/latest")
            .with_status(200)
            .with_body(r#"{"items": []}"#)
            .create_async()
            .await;

        let store = store_for(&server);
        let err = store.fetch_latest().await.unwrap_err();
        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_fetch_latest_duplicate_ids_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/b/board-1/latest")
            .with_status(200)
            .with_body(
                r#"{"record": {"items": [{"id": "a", "x": 0, "y": 0}, {"id": "a", "x": 1, "y": 1}], "version": 2}}"#,
            )
            .create_async()
            .await;

        let store = store_for(&server);
        let err = store.fetch_latest().await.unwrap_err();
        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_put_document() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/b/board-1")
            .match_header("x-master-key", "secret")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "version": 7,
                "items": [{"id": "tok", "x": 1.0, "y": 2.0}]
            })))
            .with_status(200)
            .create_async()
            .await;

        let store = store_for(&server);
        let mut document = Document::with_items(vec![Item::new("Token", "🎲", 1.0, 2.0).with_id("tok")]);
        document.stamp(Version::new(7));

        store.put_document(&document).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_put_document_failure_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/b/board-1")
            .with_status(500)
            .create_async()
            .await;

        let store = store_for(&server);
        let err = store.put_document(&Document::empty()).await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_no_access_key_header_when_unset() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/b/board-1/latest")
            .match_header("x-master-key", Matcher::Missing)
            .with_status(200)
            .with_body(LATEST_BODY)
            .create_async()
            .await;

        let config = RemoteStoreConfig::new(&server.url(), "b", "board-1");
        let store = HttpDocumentStore::new(config).unwrap();
        store.fetch_latest().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_error() {
        let config = RemoteStoreConfig::new("http://127.0.0.1:9", "b", "board-1")
            .with_timeout(std::time::Duration::from_secs(2));
        let store = HttpDocumentStore::new(config).unwrap();

        let err = store.fetch_latest().await.unwrap_err();
        assert!(err.is_transport());
    }
}
