//! Local preview generation for staged files.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::models::SelectedFile;

/// Build a data-URL preview for an image file.
///
/// Returns `None` for non-image files; those render with a generic file icon
/// instead of a thumbnail. The invariant the widget relies on: a pending file
/// has a preview if and only if it is an image.
pub fn image_preview(file: &SelectedFile) -> Option<String> {
    if !file.is_image() {
        return None;
    }
    let content_type = file
        .content_type
        .split(';')
        .next()
        .unwrap_or(&file.content_type)
        .trim()
        .to_ascii_lowercase();
    Some(format!(
        "data:{};base64,{}",
        content_type,
        STANDARD.encode(&file.data)
    ))
}
