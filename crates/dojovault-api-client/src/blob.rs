//! Blob registry bridging authenticated fetches to host UI elements.
//!
//! Markup-bound elements cannot send an Authorization header, so stored
//! documents are fetched through the client and exposed as short-lived blob
//! handles the host can render or open. Every handle is revoked on a fixed
//! timer to bound memory growth across repeated view cycles; hosts that track
//! element lifetime can revoke earlier via [`BlobStore::revoke`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use dojovault_core::{guess_content_type, DocumentStore, UploadError};
use uuid::Uuid;

/// How long an inline image handle stays resolvable.
pub const IMAGE_REVOKE_AFTER: Duration = Duration::from_secs(60);

/// How long an opened-document handle stays resolvable. Long enough for a new
/// browsing context to load the resource.
pub const DOCUMENT_REVOKE_AFTER: Duration = Duration::from_secs(10);

/// Inline placeholder shown when an authenticated image fetch fails, so the
/// host never renders a broken element.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='64' height='64'><rect width='64' height='64' fill='%23e5e7eb'/><path d='M16 44l10-12 8 9 6-7 8 10z' fill='%239ca3af'/><circle cx='24' cy='22' r='4' fill='%239ca3af'/></svg>";

/// Handle to registered blob bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobUrl {
    id: Uuid,
    url: String,
    content_type: String,
}

impl BlobUrl {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// Registry of blob handles with scheduled revocation.
///
/// Cloning shares the registry. Insertion spawns the revocation timer on the
/// ambient tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct BlobStore {
    inner: Arc<Mutex<HashMap<Uuid, Bytes>>>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes under a fresh handle and schedule its revocation.
    pub fn insert(
        &self,
        bytes: Bytes,
        content_type: impl Into<String>,
        revoke_after: Duration,
    ) -> BlobUrl {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().insert(id, bytes);

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(revoke_after).await;
            if inner.lock().unwrap().remove(&id).is_some() {
                tracing::debug!(%id, "revoked blob handle");
            }
        });

        BlobUrl {
            id,
            url: format!("blob:dojovault/{id}"),
            content_type: content_type.into(),
        }
    }

    /// Resolve a handle to its bytes, if not yet revoked.
    pub fn get(&self, handle: &BlobUrl) -> Option<Bytes> {
        self.inner.lock().unwrap().get(&handle.id).cloned()
    }

    /// Revoke a handle eagerly. Returns whether it was still registered.
    pub fn revoke(&self, handle: &BlobUrl) -> bool {
        self.inner.lock().unwrap().remove(&handle.id).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

/// What the host should assign to an image element's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Fetched bytes registered as a blob handle (revoked after
    /// [`IMAGE_REVOKE_AFTER`]).
    Blob(BlobUrl),
    /// Fetch failed; render the generic placeholder graphic.
    Placeholder(&'static str),
}

impl ImageSource {
    pub fn url(&self) -> &str {
        match self {
            ImageSource::Blob(handle) => handle.url(),
            ImageSource::Placeholder(data_url) => data_url,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageSource::Placeholder(_))
    }
}

/// Fetch a stored image with the bearer credential and expose it as a blob
/// handle for an image element. Falls back to the placeholder on any failure,
/// never a broken element. Wire this as the element's error path when a
/// query-token URL was tried first.
pub async fn load_authenticated_image(
    store: &dyn DocumentStore,
    blobs: &BlobStore,
    stored_path: &str,
) -> ImageSource {
    match store.fetch(stored_path).await {
        Ok(bytes) => ImageSource::Blob(blobs.insert(
            bytes,
            guess_content_type(stored_path),
            IMAGE_REVOKE_AFTER,
        )),
        Err(err) => {
            tracing::warn!(stored_path, error = %err, "image fetch failed; using placeholder");
            ImageSource::Placeholder(PLACEHOLDER_IMAGE)
        }
    }
}

/// Fetch a stored document with the bearer credential and expose it as a blob
/// handle for the host to open in a new browsing context. The handle is
/// revoked after [`DOCUMENT_REVOKE_AFTER`]; failures surface to the caller
/// for notification.
pub async fn open_authenticated_document(
    store: &dyn DocumentStore,
    blobs: &BlobStore,
    stored_path: &str,
) -> Result<BlobUrl, UploadError> {
    let bytes = store.fetch(stored_path).await?;
    Ok(blobs.insert(
        bytes,
        guess_content_type(stored_path),
        DOCUMENT_REVOKE_AFTER,
    ))
}
