//! File validation run before a selection is accepted.

use crate::error::UploadError;
use crate::models::{DocumentCategory, SelectedFile};

/// Default validation ceiling: 5 MiB.
pub const DEFAULT_MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Normalize a MIME type by stripping parameters and case
/// (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase()
}

/// Validate file size against the ceiling.
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), UploadError> {
    if file_size > max_size {
        return Err(UploadError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// Validate a MIME type against the category's accepted set.
pub fn validate_content_type(
    content_type: &str,
    category: DocumentCategory,
) -> Result<(), UploadError> {
    let normalized = normalize_content_type(content_type);
    if !category
        .allowed_content_types()
        .iter()
        .any(|allowed| normalized == *allowed)
    {
        return Err(UploadError::InvalidInput(
            category.unsupported_type_message().to_string(),
        ));
    }
    Ok(())
}

/// Run the full pre-acceptance check: size first, then MIME type.
pub fn validate_file(
    file: &SelectedFile,
    max_size: usize,
    category: DocumentCategory,
) -> Result<(), UploadError> {
    validate_file_size(file.size(), max_size)?;
    validate_content_type(&file.content_type, category)?;
    Ok(())
}
