//! Authenticated HTTP client for the DojoVault document storage API.
//!
//! Provides a minimal client with an injected bearer-credential provider,
//! byte-GET and multipart-POST helpers, the domain methods for document
//! upload/retrieval, and the blob registry that bridges authenticated fetches
//! to host UI elements that cannot send custom headers.

pub mod blob;
pub mod documents;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use dojovault_core::UploadError;
use serde::de::DeserializeOwned;

/// Source of the bearer credential for authenticated calls.
///
/// The credential lives in the host's session context and may change (login,
/// refresh, logout), so the client asks for it per request instead of holding
/// a copy.
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed token, for command-line use and tests.
#[derive(Clone, Debug)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// HTTP client for the document storage API.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn TokenProvider>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn TokenProvider>,
    ) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| UploadError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Create a client from the environment: `DOJOVAULT_API_URL` (defaults to
    /// `http://localhost:5000/api`) and `DOJOVAULT_TOKEN`.
    pub fn from_env() -> Result<Self, UploadError> {
        let base_url = std::env::var("DOJOVAULT_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000/api".to_string());
        let token = std::env::var("DOJOVAULT_TOKEN").map_err(|_| {
            UploadError::Unauthorized("Missing token. Set DOJOVAULT_TOKEN".to_string())
        })?;
        Self::new(base_url, Arc::new(StaticToken::new(token)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Current credential for query-token call sites (thumbnails).
    pub(crate) fn query_token(&self) -> Option<String> {
        self.credentials.bearer_token()
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.credentials.bearer_token() {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// Map a non-2xx response body to an error, surfacing the server's
    /// human-readable `error` field when present.
    fn error_from_response(status: u16, body: &str) -> UploadError {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    body.trim().to_string()
                }
            });
        match status {
            401 => UploadError::Unauthorized(message),
            404 => UploadError::NotFound(message),
            _ => UploadError::Api { status, message },
        }
    }

    /// GET raw bytes with the bearer header.
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Bytes, UploadError> {
        let url = self.build_url(path);
        let request = self.apply_auth(self.client.get(&url));

        let response = request
            .send()
            .await
            .map_err(|e| UploadError::Transport(format!("Failed to send request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%url, status = status.as_u16(), "document fetch failed");
            return Err(Self::error_from_response(status.as_u16(), &body));
        }

        response
            .bytes()
            .await
            .map_err(|e| UploadError::Transport(format!("Failed to read response body: {e}")))
    }

    /// POST a multipart form with the bearer header and deserialize the JSON
    /// response.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, UploadError> {
        let url = self.build_url(path);
        let request = self.apply_auth(self.client.post(&url).multipart(form));

        let response = request
            .send()
            .await
            .map_err(|e| UploadError::Transport(format!("Failed to send request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%url, status = status.as_u16(), "upload request failed");
            return Err(Self::error_from_response(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| UploadError::Transport(format!("Failed to parse response as JSON: {e}")))
    }
}

pub use blob::{
    load_authenticated_image, open_authenticated_document, BlobStore, BlobUrl, ImageSource,
    DOCUMENT_REVOKE_AFTER, IMAGE_REVOKE_AFTER, PLACEHOLDER_IMAGE,
};
