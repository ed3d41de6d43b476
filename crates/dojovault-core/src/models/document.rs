//! Storage API response models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::DocumentCategory;

/// A stored document as the storage API describes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAttachment {
    pub id: i64,
    pub file_name: String,
    /// Server-side path; the value the parent record persists.
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
    pub document_type: DocumentCategory,
    pub related_id: i64,
}

/// Success body of `POST /documents/upload`.
///
/// `thumbnails` is only present when the server generated resized variants
/// (image uploads).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub document: DocumentAttachment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnails: Option<HashMap<String, String>>,
}

impl UploadResponse {
    /// The stored path the owner record should persist.
    pub fn stored_path(&self) -> &str {
        &self.document.file_path
    }
}
