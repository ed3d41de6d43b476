//! Host callback seams for the upload widget.

use async_trait::async_trait;

use crate::models::{SelectedFile, UploadResponse};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Surface for transient user-facing messages (validation failures, upload
/// errors). Injected by the host instead of being read from a global.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

/// Default notifier that routes messages to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => tracing::info!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Error => tracing::error!("{message}"),
        }
    }
}

/// Callbacks the widget invokes at its lifecycle points.
///
/// All methods have no-op defaults so hosts only implement what they observe.
#[async_trait]
pub trait WidgetHooks: Send + Sync {
    /// A file was staged (with its preview, if an image) or the selection was
    /// cleared.
    fn on_selection_changed(&self, _file: Option<&SelectedFile>, _preview: Option<&str>) {}

    /// The deferred upload committed; `response` carries the stored path the
    /// parent record should persist.
    async fn on_upload_complete(&self, _response: &UploadResponse) {}

    /// Ask the user to confirm removal of an existing document. Returning
    /// `false` aborts the removal with state unchanged.
    async fn confirm_removal(&self) -> bool {
        true
    }

    /// The user confirmed removal. The host performs the parent-record patch
    /// that clears the stored path and returns whether the widget should reset
    /// to its empty state. Errors are the host's to surface; the widget only
    /// preserves its state.
    async fn on_delete_confirmed(&self) -> anyhow::Result<bool> {
        Ok(false)
    }
}

/// Hooks implementation for widgets with nothing to observe.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHooks;

#[async_trait]
impl WidgetHooks for NoOpHooks {}
