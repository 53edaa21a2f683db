//! File area abstraction shared by the staging and archive areas.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    Write(String),

    #[error("Read failed: {0}")]
    Read(String),

    #[error("No stored file for key {0}")]
    NotFound(String),

    #[error("Rejected storage key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage area unavailable: {0}")]
    Init(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// One file area, addressed by flat keys and served under a URL prefix.
///
/// The pipeline holds one instance per area, so tests can swap in a failing
/// or in-memory backend for either one.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` under `key`, replacing any previous file, and return its public URL.
    async fn upload_with_key(&self, key: &str, data: Vec<u8>, content_type: &str)
        -> StorageResult<String>;

    async fn download(&self, key: &str) -> StorageResult<Vec<u8>>;

    async fn exists(&self, key: &str) -> StorageResult<bool>;

    fn url_for(&self, key: &str) -> String;
}
