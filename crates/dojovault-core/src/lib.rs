//! DojoVault Core Library
//!
//! Domain models, validation, and the upload widget state machine for
//! attaching documents (member photos, graduation and qualification
//! certificates) to membership records. The HTTP implementation of
//! [`store::DocumentStore`] lives in the `dojovault-api-client` crate.

pub mod error;
pub mod hooks;
pub mod models;
pub mod preview;
pub mod store;
pub mod validation;
pub mod widget;

// Re-export commonly used types
pub use error::UploadError;
pub use hooks::{NoOpHooks, Notifier, Severity, TracingNotifier, WidgetHooks};
pub use models::{
    format_file_size, guess_content_type, DocumentAttachment, DocumentCategory, SelectedFile,
    ThumbnailSize, UploadResponse,
};
pub use preview::image_preview;
pub use store::DocumentStore;
pub use validation::{validate_file, DEFAULT_MAX_FILE_SIZE};
pub use widget::{UploadWidget, WidgetConfig, WidgetState, WidgetView};
