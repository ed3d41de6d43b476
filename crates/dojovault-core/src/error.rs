//! Error types module
//!
//! All failures in the upload workflow are unified under the `UploadError`
//! enum: client-side validation, missing-precondition, API, and transport
//! errors. The HTTP client crate maps its own failures into these variants so
//! the widget and its callers only ever see one taxonomy.

/// Unified error type for the document upload workflow.
///
/// Validation variants (`PayloadTooLarge`, `InvalidInput`) are produced before
/// any network activity and always leave widget state untouched. `Api` carries
/// the server's human-readable `error` field alongside the HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Upload attempted before the parent record has an identifier.
    #[error("Owner record not set: {0}")]
    OwnerNotSet(String),

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl UploadError {
    /// Whether the failure happened before any request was issued.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            UploadError::PayloadTooLarge(_)
                | UploadError::InvalidInput(_)
                | UploadError::OwnerNotSet(_)
        )
    }

    /// Message suitable for a user-facing notification: the inner text
    /// without the variant prefix Display adds for logs.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Api { message, .. } => message.clone(),
            UploadError::PayloadTooLarge(m)
            | UploadError::InvalidInput(m)
            | UploadError::OwnerNotSet(m)
            | UploadError::Transport(m)
            | UploadError::NotFound(m)
            | UploadError::Unauthorized(m) => m.clone(),
        }
    }
}
