//! In-process doubles for the classifier, notifier, storage and registry.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use whisker_api::Notifier;
use whisker_core::models::{ChatRecord, NewChat};
use whisker_core::AppError;
use whisker_db::ChatRegistry;
use whisker_processing::{CatScorer, ClassifierError, InputTensor};
use whisker_storage::{Storage, StorageError, StorageResult};

/// Scorer returning a fixed score (or failing) and counting calls.
pub struct StubScorer {
    score: Option<f32>,
    calls: AtomicUsize,
}

impl StubScorer {
    pub fn returning(score: f32) -> Arc<Self> {
        Arc::new(Self {
            score: Some(score),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            score: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatScorer for StubScorer {
    async fn score(&self, _input: &InputTensor) -> Result<f32, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.score
            .ok_or_else(|| ClassifierError::Scorer("model server unavailable".to_string()))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Notifier recording every (email, cat name) pair it is asked to send.
pub struct RecordingNotifier {
    result: bool,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            result: true,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            result: false,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, email: &str, cat_name: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), cat_name.to_string()));
        self.result
    }
}

/// Storage that refuses every write.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        _data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<String> {
        Err(StorageError::Write(format!(
            "disk full while writing {}",
            storage_key
        )))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        Err(StorageError::NotFound(storage_key.to_string()))
    }

    async fn exists(&self, _storage_key: &str) -> StorageResult<bool> {
        Ok(false)
    }

    fn url_for(&self, storage_key: &str) -> String {
        format!("/failing/{}", storage_key)
    }
}

/// Registry whose inserts always fail.
pub struct FailingRegistry;

#[async_trait]
impl ChatRegistry for FailingRegistry {
    async fn insert(&self, _chat: NewChat) -> Result<ChatRecord, AppError> {
        Err(AppError::Internal("database is locked".to_string()))
    }

    async fn list_ordered(&self) -> Result<Vec<ChatRecord>, AppError> {
        Ok(Vec::new())
    }
}
