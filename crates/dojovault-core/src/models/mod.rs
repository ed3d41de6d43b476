//! Domain models shared across the upload workflow.

pub mod category;
pub mod document;
pub mod file;

pub use category::{DocumentCategory, ThumbnailSize};
pub use document::{DocumentAttachment, UploadResponse};
pub use file::{format_file_size, guess_content_type, SelectedFile};
