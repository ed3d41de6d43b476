//! Domain methods for the document storage API.
//!
//! Two authentication strategies coexist on purpose: full-resolution
//! view/download calls send the bearer credential as a header (`upload`,
//! `fetch_document`), while thumbnail URLs embed it as a query parameter so
//! they work inside plain markup attributes without a scripted fetch.

use async_trait::async_trait;
use bytes::Bytes;
use dojovault_core::{
    DocumentCategory, DocumentStore, SelectedFile, ThumbnailSize, UploadError, UploadResponse,
};

use crate::ApiClient;

/// Percent-encode a stored path segment by segment so embedded slashes
/// survive as path separators.
fn encode_stored_path(stored_path: &str) -> String {
    stored_path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl ApiClient {
    /// Upload a file for an owner record.
    ///
    /// Multipart body: the file bytes, the category's wire name as
    /// `document_type`, and the owner id as `related_id`. The bearer
    /// credential travels in the Authorization header, never as a query
    /// parameter.
    pub async fn upload_document(
        &self,
        category: DocumentCategory,
        owner_record_id: i64,
        file: &SelectedFile,
    ) -> Result<UploadResponse, UploadError> {
        let part = reqwest::multipart::Part::bytes(file.data.to_vec())
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)
            .map_err(|e| UploadError::InvalidInput(format!("Invalid content type: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("document_type", category.wire_name())
            .text("related_id", owner_record_id.to_string());

        tracing::debug!(
            category = category.wire_name(),
            owner_record_id,
            filename = %file.filename,
            size = file.size(),
            "uploading document"
        );
        self.post_multipart("/documents/upload", form).await
    }

    /// Fetch the raw bytes of a stored document (header-authenticated).
    pub async fn fetch_document(&self, stored_path: &str) -> Result<Bytes, UploadError> {
        let path = format!("/documents/by-path/{}/view", encode_stored_path(stored_path));
        self.get_bytes(&path).await
    }

    /// Full view URL for a stored document. Callers still need the bearer
    /// header; use [`ApiClient::fetch_document`] or the blob helpers for
    /// element-bound rendering.
    pub fn document_view_url(&self, stored_path: &str) -> String {
        self.build_url(&format!(
            "/documents/by-path/{}/view",
            encode_stored_path(stored_path)
        ))
    }

    /// Directly embeddable thumbnail URL with the credential as a query
    /// parameter. Thumbnails are lower-sensitivity and must work in plain
    /// `src` attributes.
    pub fn thumbnail_url(&self, stored_path: &str, size: ThumbnailSize) -> String {
        let url = self.build_url(&format!(
            "/documents/by-path/{}/thumbnail/{}",
            encode_stored_path(stored_path),
            size.as_str()
        ));
        match self.query_token() {
            Some(token) => format!("{}?token={}", url, urlencoding::encode(&token)),
            None => url,
        }
    }
}

#[async_trait]
impl DocumentStore for ApiClient {
    async fn upload(
        &self,
        category: DocumentCategory,
        owner_record_id: i64,
        file: &SelectedFile,
    ) -> Result<UploadResponse, UploadError> {
        self.upload_document(category, owner_record_id, file).await
    }

    async fn fetch(&self, stored_path: &str) -> Result<Bytes, UploadError> {
        self.fetch_document(stored_path).await
    }

    fn thumbnail_url(&self, stored_path: &str, size: ThumbnailSize) -> String {
        ApiClient::thumbnail_url(self, stored_path, size)
    }
}
