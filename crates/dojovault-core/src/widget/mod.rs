//! The upload widget state machine.
//!
//! One widget instance manages the full lifecycle of attaching a single
//! document (photo or certificate) to a parent record: selection, validated
//! preview, deferred network upload, and viewing/replacement/removal of a
//! previously stored document.
//!
//! Upload is a two-phase protocol. `stage` validates a file and holds it in
//! memory; `commit` performs the network upload once the owner record has an
//! identifier. The split exists because the parent record may not exist yet
//! when the user picks the file (new-record creation flow).

pub mod view;

use std::sync::Arc;

use bytes::Bytes;

use crate::error::UploadError;
use crate::hooks::{Notifier, NoOpHooks, Severity, TracingNotifier, WidgetHooks};
use crate::models::{format_file_size, DocumentCategory, SelectedFile, UploadResponse};
use crate::preview::image_preview;
use crate::store::DocumentStore;
use crate::validation::{validate_file, DEFAULT_MAX_FILE_SIZE};

pub use view::{ExistingDocument, PendingPreview, UploadPrompt, WidgetView};

/// Visual mode of the widget. Exactly one variant holds at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetState {
    /// No stored document and no staged file; renders the drop target.
    Empty,
    /// A previously uploaded document exists for the owner record.
    Existing { stored_path: String },
    /// A file has been selected and validated but not yet uploaded.
    /// `preview` is a data URL, present iff the file is an image.
    Pending {
        file: SelectedFile,
        preview: Option<String>,
    },
}

/// Construction-time options for a widget.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub category: DocumentCategory,
    /// Identifier of the parent record, when it already exists (edit flow).
    pub owner_record_id: Option<i64>,
    /// Stored path from the fetched parent record, when editing a record that
    /// already has a document.
    pub existing_path: Option<String>,
    pub max_file_size: usize,
}

impl WidgetConfig {
    pub fn new(category: DocumentCategory) -> Self {
        Self {
            category,
            owner_record_id: None,
            existing_path: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    pub fn with_owner_record_id(mut self, id: i64) -> Self {
        self.owner_record_id = Some(id);
        self
    }

    pub fn with_existing_path(mut self, path: impl Into<String>) -> Self {
        self.existing_path = Some(path.into());
        self
    }

    pub fn with_max_file_size(mut self, max: usize) -> Self {
        self.max_file_size = max;
        self
    }
}

/// Per-field upload unit. See the module docs for the lifecycle.
pub struct UploadWidget {
    category: DocumentCategory,
    owner_record_id: Option<i64>,
    max_file_size: usize,
    state: WidgetState,
    hooks: Arc<dyn WidgetHooks>,
    notifier: Arc<dyn Notifier>,
}

impl UploadWidget {
    pub fn new(
        config: WidgetConfig,
        hooks: Arc<dyn WidgetHooks>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let state = match config.existing_path {
            Some(path) if !path.trim().is_empty() => WidgetState::Existing { stored_path: path },
            _ => WidgetState::Empty,
        };
        Self {
            category: config.category,
            owner_record_id: config.owner_record_id,
            max_file_size: config.max_file_size,
            state,
            hooks,
            notifier,
        }
    }

    /// Widget with no-op hooks and tracing-backed notifications.
    pub fn with_defaults(config: WidgetConfig) -> Self {
        Self::new(config, Arc::new(NoOpHooks), Arc::new(TracingNotifier))
    }

    pub fn category(&self) -> DocumentCategory {
        self.category
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn owner_record_id(&self) -> Option<i64> {
        self.owner_record_id
    }

    /// Bind the parent record's identifier once it exists (after the create
    /// call returns). Must happen before `commit`.
    pub fn set_owner_record_id(&mut self, id: i64) {
        self.owner_record_id = Some(id);
    }

    pub fn has_file(&self) -> bool {
        matches!(self.state, WidgetState::Pending { .. })
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match &self.state {
            WidgetState::Pending { file, .. } => Some(file),
            _ => None,
        }
    }

    /// Stored path of the existing document, when in that mode.
    pub fn stored_path(&self) -> Option<&str> {
        match &self.state {
            WidgetState::Existing { stored_path } => Some(stored_path),
            _ => None,
        }
    }

    /// Project the current state into a renderable description.
    pub fn view(&self) -> WidgetView {
        match &self.state {
            WidgetState::Empty => WidgetView::Empty(UploadPrompt {
                label: self.category.display_label(),
                accepted_extensions: self.category.accepted_extensions_label(),
                max_size_label: format!("{} MB", self.max_file_size / 1024 / 1024),
            }),
            WidgetState::Existing { stored_path } => WidgetView::Existing(ExistingDocument {
                stored_path: stored_path.clone(),
                label: self.category.display_label(),
            }),
            WidgetState::Pending { file, preview } => WidgetView::Pending(PendingPreview {
                file_name: file.filename.clone(),
                size_label: format_file_size(file.size() as u64),
                image_data_url: preview.clone(),
            }),
        }
    }

    /// Stage a user-chosen file: validate, generate the preview, and hold the
    /// file until `commit`.
    ///
    /// Rejections (size, MIME type) notify the user and leave state untouched.
    /// Staging while a file is already pending replaces it (last-write-wins);
    /// staging over an existing document supersedes its card until the upload
    /// commits or the selection is cancelled.
    pub fn stage(&mut self, file: SelectedFile) -> Result<(), UploadError> {
        if let Err(err) = validate_file(&file, self.max_file_size, self.category) {
            self.notifier.notify(Severity::Error, &err.user_message());
            tracing::warn!(
                filename = %file.filename,
                content_type = %file.content_type,
                error = %err,
                "rejected file selection"
            );
            return Err(err);
        }

        let preview = image_preview(&file);
        self.hooks.on_selection_changed(Some(&file), preview.as_deref());
        tracing::debug!(
            filename = %file.filename,
            size = file.size(),
            has_preview = preview.is_some(),
            "staged file"
        );
        self.state = WidgetState::Pending { file, preview };
        Ok(())
    }

    /// Discard the staged file and return to the empty state. No-op unless a
    /// file is pending.
    pub fn cancel(&mut self) {
        if matches!(self.state, WidgetState::Pending { .. }) {
            self.state = WidgetState::Empty;
            self.hooks.on_selection_changed(None, None);
            tracing::debug!("cancelled staged file");
        }
    }

    /// Clear the existing-document card locally so a new file can be chosen.
    /// No network call: the server keeps the old path until a new upload
    /// commits or the document is explicitly removed.
    pub fn replace(&mut self) {
        if matches!(self.state, WidgetState::Existing { .. }) {
            self.state = WidgetState::Empty;
            tracing::debug!("cleared existing document locally");
        }
    }

    /// Remove the existing document: ask the host to confirm, then let it
    /// patch the parent record. Returns whether the widget reset.
    ///
    /// Failures in the host callback leave the existing state intact; the
    /// callback owns surfacing its own errors.
    pub async fn remove(&mut self) -> bool {
        if !matches!(self.state, WidgetState::Existing { .. }) {
            return false;
        }
        if !self.hooks.confirm_removal().await {
            return false;
        }
        match self.hooks.on_delete_confirmed().await {
            Ok(true) => {
                self.state = WidgetState::Empty;
                tracing::debug!("removed existing document");
                true
            }
            Ok(false) => false,
            Err(err) => {
                tracing::warn!(error = %err, "delete callback failed; keeping existing document");
                false
            }
        }
    }

    /// Commit the deferred upload.
    ///
    /// Returns `Ok(None)` when nothing is staged. Fails without touching the
    /// network when the owner record id is unset. On success the widget
    /// transitions to the existing-document state with the returned stored
    /// path; on failure the staged file is preserved so the user can retry.
    pub async fn commit(
        &mut self,
        store: &dyn DocumentStore,
    ) -> Result<Option<UploadResponse>, UploadError> {
        let file = match &self.state {
            WidgetState::Pending { file, .. } => file.clone(),
            _ => return Ok(None),
        };

        let Some(owner_record_id) = self.owner_record_id else {
            let message = "Record id not set. Save the record before uploading.";
            self.notifier.notify(Severity::Warning, message);
            tracing::warn!("upload attempted without an owner record id");
            return Err(UploadError::OwnerNotSet(message.to_string()));
        };

        match store.upload(self.category, owner_record_id, &file).await {
            Ok(response) => {
                tracing::info!(
                    owner_record_id,
                    stored_path = %response.stored_path(),
                    "upload committed"
                );
                self.hooks.on_upload_complete(&response).await;
                self.state = WidgetState::Existing {
                    stored_path: response.stored_path().to_string(),
                };
                Ok(Some(response))
            }
            Err(err) => {
                self.notifier.notify(
                    Severity::Error,
                    &format!("Upload failed: {}", err.user_message()),
                );
                tracing::error!(owner_record_id, error = %err, "upload failed");
                Err(err)
            }
        }
    }

    /// Fetch the bytes of the existing document for viewing. `Ok(None)` when
    /// no document is stored. Hosts that need a browsable handle go through
    /// the blob helpers in the API client crate instead.
    pub async fn view_document(
        &self,
        store: &dyn DocumentStore,
    ) -> Result<Option<Bytes>, UploadError> {
        match &self.state {
            WidgetState::Existing { stored_path } => store.fetch(stored_path).await.map(Some),
            _ => Ok(None),
        }
    }

    /// Adopt a stored path pushed by the host (e.g. after re-fetching the
    /// parent record).
    pub fn set_existing_path(&mut self, path: Option<String>) {
        self.state = match path {
            Some(p) if !p.trim().is_empty() => WidgetState::Existing { stored_path: p },
            _ => WidgetState::Empty,
        };
    }

    /// Drop any staged or existing-document state.
    pub fn reset(&mut self) {
        self.state = WidgetState::Empty;
    }
}
