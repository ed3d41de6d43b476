//! Capability interface over the document storage API.
//!
//! The widget never touches HTTP directly; it talks to a `DocumentStore`. The
//! production implementation lives in the API client crate, tests use
//! in-memory mocks. The trait also unifies the two authentication strategies
//! the storage API supports: `upload`/`fetch` run with the bearer credential in
//! a header, `thumbnail_url` returns a URL with the credential embedded as a
//! query parameter for markup-only call sites.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::UploadError;
use crate::models::{DocumentCategory, SelectedFile, ThumbnailSize, UploadResponse};

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Upload a file for the given owner record. Bearer credential travels in
    /// the Authorization header, never as a query parameter.
    async fn upload(
        &self,
        category: DocumentCategory,
        owner_record_id: i64,
        file: &SelectedFile,
    ) -> Result<UploadResponse, UploadError>;

    /// Fetch the raw bytes of a stored document (header-authenticated).
    async fn fetch(&self, stored_path: &str) -> Result<Bytes, UploadError>;

    /// Directly embeddable thumbnail URL (query-token authenticated).
    fn thumbnail_url(&self, stored_path: &str, size: ThumbnailSize) -> String;
}
