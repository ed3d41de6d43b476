//! In-memory handle to a user-chosen file.

use bytes::Bytes;

/// A file the user selected, held in memory until the upload commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl SelectedFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Whether the file's MIME type is in the `image/` family.
    pub fn is_image(&self) -> bool {
        self.content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }
}

/// Guess a MIME type from a filename's extension.
///
/// For hosts that read files from disk and have no browser-supplied type.
/// Unknown extensions map to `application/octet-stream`, which no category
/// accepts.
pub fn guess_content_type(filename: &str) -> &'static str {
    let extension = filename
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Human-readable file size for view labels ("2.5 MB", "340 KB").
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    format!("{} {}", (value * 100.0).round() / 100.0, UNITS[exponent])
}
