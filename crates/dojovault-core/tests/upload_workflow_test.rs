//! End-to-end widget workflow against an in-memory document store.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use dojovault_core::{
    DocumentCategory, DocumentStore, Notifier, SelectedFile, Severity, ThumbnailSize,
    UploadError, UploadResponse, UploadWidget, WidgetConfig, WidgetHooks, WidgetState,
};

/// Store that records upload calls and answers from a canned script.
#[derive(Default)]
struct MockStore {
    uploads: Mutex<Vec<(DocumentCategory, i64, String)>>,
    fetches: Mutex<Vec<String>>,
    fail_next_upload: AtomicBool,
}

impl MockStore {
    fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    fn response_for(category: DocumentCategory, owner_record_id: i64, file: &SelectedFile) -> UploadResponse {
        serde_json::from_value(serde_json::json!({
            "message": "File uploaded successfully",
            "document": {
                "id": 1,
                "file_name": file.filename,
                "file_path": format!("member/{}-{}", owner_record_id, file.filename),
                "file_type": file.content_type,
                "file_size": file.size() as i64,
                "document_type": category,
                "related_id": owner_record_id
            }
        }))
        .unwrap()
    }
}

#[async_trait]
impl DocumentStore for MockStore {
    async fn upload(
        &self,
        category: DocumentCategory,
        owner_record_id: i64,
        file: &SelectedFile,
    ) -> Result<UploadResponse, UploadError> {
        self.uploads
            .lock()
            .unwrap()
            .push((category, owner_record_id, file.filename.clone()));
        if self.fail_next_upload.swap(false, Ordering::SeqCst) {
            return Err(UploadError::Api {
                status: 403,
                message: "No permission to upload to this record".into(),
            });
        }
        Ok(Self::response_for(category, owner_record_id, file))
    }

    async fn fetch(&self, stored_path: &str) -> Result<Bytes, UploadError> {
        self.fetches.lock().unwrap().push(stored_path.to_string());
        Ok(Bytes::from_static(b"stored bytes"))
    }

    fn thumbnail_url(&self, stored_path: &str, size: ThumbnailSize) -> String {
        format!("mock://{}/{}", stored_path, size.as_str())
    }
}

#[derive(Default)]
struct RecordingHooks {
    completed: Mutex<Vec<String>>,
    delete_answer: Option<anyhow::Result<bool>>,
    confirm: AtomicBool,
    delete_calls: AtomicUsize,
}

impl RecordingHooks {
    fn confirming(delete_answer: anyhow::Result<bool>) -> Self {
        let hooks = Self {
            delete_answer: Some(delete_answer),
            ..Default::default()
        };
        hooks.confirm.store(true, Ordering::SeqCst);
        hooks
    }
}

#[async_trait]
impl WidgetHooks for RecordingHooks {
    async fn on_upload_complete(&self, response: &UploadResponse) {
        self.completed
            .lock()
            .unwrap()
            .push(response.stored_path().to_string());
    }

    async fn confirm_removal(&self) -> bool {
        self.confirm.load(Ordering::SeqCst)
    }

    async fn on_delete_confirmed(&self) -> anyhow::Result<bool> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        match &self.delete_answer {
            Some(Ok(reset)) => Ok(*reset),
            Some(Err(err)) => Err(anyhow::anyhow!(err.to_string())),
            None => Ok(false),
        }
    }
}

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}

fn photo_file() -> SelectedFile {
    SelectedFile::new("photo.png", "image/png", vec![0u8; 1024])
}

#[tokio::test]
async fn test_commit_without_owner_id_never_calls_store() {
    let store = MockStore::default();
    let notifier = Arc::new(RecordingNotifier::default());
    let mut widget = UploadWidget::new(
        WidgetConfig::new(DocumentCategory::MemberPhoto),
        Arc::new(RecordingHooks::default()),
        notifier.clone(),
    );
    widget.stage(photo_file()).unwrap();

    let err = widget.commit(&store).await.unwrap_err();

    assert!(matches!(err, UploadError::OwnerNotSet(_)));
    assert_eq!(store.upload_count(), 0);
    let messages = notifier.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, Severity::Warning);
    assert!(messages[0].1.contains("Save the record"));
}

#[tokio::test]
async fn test_commit_with_nothing_staged_is_a_no_op() {
    let store = MockStore::default();
    let mut widget = UploadWidget::with_defaults(
        WidgetConfig::new(DocumentCategory::MemberPhoto).with_owner_record_id(42),
    );
    assert!(widget.commit(&store).await.unwrap().is_none());
    assert_eq!(store.upload_count(), 0);
}

#[tokio::test]
async fn test_stage_then_commit_transitions_to_existing() {
    // Scenario: owner record 42, staged photo, upload resolves with a path.
    let store = MockStore::default();
    let hooks = Arc::new(RecordingHooks::default());
    let mut widget = UploadWidget::new(
        WidgetConfig::new(DocumentCategory::MemberPhoto),
        hooks.clone(),
        Arc::new(RecordingNotifier::default()),
    );
    widget.stage(photo_file()).unwrap();
    widget.set_owner_record_id(42);

    let response = widget.commit(&store).await.unwrap().unwrap();

    assert_eq!(response.stored_path(), "member/42-photo.png");
    assert_eq!(widget.stored_path(), Some("member/42-photo.png"));
    assert_eq!(
        *hooks.completed.lock().unwrap(),
        vec!["member/42-photo.png".to_string()]
    );
    let uploads = store.uploads.lock().unwrap();
    assert_eq!(
        *uploads,
        vec![(DocumentCategory::MemberPhoto, 42, "photo.png".to_string())]
    );
}

#[tokio::test]
async fn test_failed_commit_preserves_pending_for_retry() {
    let store = MockStore::default();
    store.fail_next_upload.store(true, Ordering::SeqCst);
    let notifier = Arc::new(RecordingNotifier::default());
    let mut widget = UploadWidget::new(
        WidgetConfig::new(DocumentCategory::MemberPhoto).with_owner_record_id(42),
        Arc::new(RecordingHooks::default()),
        notifier.clone(),
    );
    widget.stage(photo_file()).unwrap();

    let err = widget.commit(&store).await.unwrap_err();
    assert!(matches!(err, UploadError::Api { status: 403, .. }));
    assert!(widget.has_file(), "staged file must survive a failed upload");
    {
        let messages = notifier.messages.lock().unwrap();
        assert!(messages[0].1.contains("No permission to upload to this record"));
    }

    // Retry with the same staged file succeeds.
    let response = widget.commit(&store).await.unwrap().unwrap();
    assert_eq!(response.document.related_id, 42);
    assert_eq!(store.upload_count(), 2);
}

#[tokio::test]
async fn test_remove_confirmed_resets_widget() {
    // Scenario: existing certificate at grad/55.pdf, host clears the record.
    let hooks = Arc::new(RecordingHooks::confirming(Ok(true)));
    let mut widget = UploadWidget::new(
        WidgetConfig::new(DocumentCategory::GraduationCertificate)
            .with_existing_path("grad/55.pdf"),
        hooks.clone(),
        Arc::new(RecordingNotifier::default()),
    );

    assert!(widget.remove().await);
    assert_eq!(*widget.state(), WidgetState::Empty);
    assert_eq!(hooks.delete_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_remove_declined_by_user_keeps_existing() {
    let hooks = Arc::new(RecordingHooks::default()); // confirm defaults to false
    let mut widget = UploadWidget::new(
        WidgetConfig::new(DocumentCategory::GraduationCertificate)
            .with_existing_path("grad/55.pdf"),
        hooks.clone(),
        Arc::new(RecordingNotifier::default()),
    );

    assert!(!widget.remove().await);
    assert_eq!(widget.stored_path(), Some("grad/55.pdf"));
    assert_eq!(hooks.delete_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_remove_callback_failure_keeps_existing() {
    let hooks = Arc::new(RecordingHooks::confirming(Err(anyhow::anyhow!(
        "record patch failed"
    ))));
    let mut widget = UploadWidget::new(
        WidgetConfig::new(DocumentCategory::QualificationCertificate)
            .with_existing_path("qual/9.pdf"),
        hooks,
        Arc::new(RecordingNotifier::default()),
    );

    assert!(!widget.remove().await);
    assert_eq!(widget.stored_path(), Some("qual/9.pdf"));
}

#[tokio::test]
async fn test_view_document_fetches_stored_bytes() {
    let store = MockStore::default();
    let widget = UploadWidget::with_defaults(
        WidgetConfig::new(DocumentCategory::MemberPhoto).with_existing_path("abc/123.jpg"),
    );

    let bytes = widget.view_document(&store).await.unwrap().unwrap();
    assert_eq!(&bytes[..], b"stored bytes");
    assert_eq!(*store.fetches.lock().unwrap(), vec!["abc/123.jpg".to_string()]);
}

#[tokio::test]
async fn test_view_document_without_existing_is_none() {
    let store = MockStore::default();
    let widget = UploadWidget::with_defaults(WidgetConfig::new(DocumentCategory::MemberPhoto));
    assert!(widget.view_document(&store).await.unwrap().is_none());
    assert!(store.fetches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_full_edit_cycle() {
    // Create flow: stage before the record exists, bind the id after the
    // create call returns, commit, then remove the uploaded document.
    let store = MockStore::default();
    let hooks = Arc::new(RecordingHooks::confirming(Ok(true)));
    let mut widget = UploadWidget::new(
        WidgetConfig::new(DocumentCategory::QualificationCertificate),
        hooks,
        Arc::new(RecordingNotifier::default()),
    );

    widget
        .stage(SelectedFile::new("cert.pdf", "application/pdf", vec![1u8; 2048]))
        .unwrap();
    assert!(widget.has_file());

    widget.set_owner_record_id(7);
    let response = widget.commit(&store).await.unwrap().unwrap();
    assert_eq!(widget.stored_path(), Some(response.stored_path()));

    assert!(widget.remove().await);
    assert_eq!(*widget.state(), WidgetState::Empty);
}
