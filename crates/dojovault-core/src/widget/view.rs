//! Pure view projection of the widget state.
//!
//! The widget renders to a description; the host UI layer owns diffing and
//! patching. Each variant corresponds to exactly one widget state.

use serde::Serialize;

/// What the host should render for the widget right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WidgetView {
    /// Drop/click target inviting a selection.
    Empty(UploadPrompt),
    /// Summary card for a stored document with View/Replace/Remove actions.
    Existing(ExistingDocument),
    /// Drop target plus preview of the staged file and a Cancel action.
    Pending(PendingPreview),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadPrompt {
    pub label: &'static str,
    pub accepted_extensions: &'static str,
    pub max_size_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExistingDocument {
    pub stored_path: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingPreview {
    pub file_name: String,
    pub size_label: String,
    /// Data URL for image files; `None` renders the generic file icon.
    pub image_data_url: Option<String>,
}
