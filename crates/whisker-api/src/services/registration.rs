//! Registration store: archive copy plus registry record.
//!
//! The archive write always happens before the registry insert. A failed
//! insert leaves the archived file in place; it is logged, never removed.

use std::sync::Arc;

use whisker_core::models::{ChatRecord, NewChat};
use whisker_core::AppError;
use whisker_db::ChatRegistry;
use whisker_storage::Storage;

#[derive(Clone)]
pub struct RegistrationStore {
    staging: Arc<dyn Storage>,
    archive: Arc<dyn Storage>,
    registry: Arc<dyn ChatRegistry>,
}

impl RegistrationStore {
    pub fn new(
        staging: Arc<dyn Storage>,
        archive: Arc<dyn Storage>,
        registry: Arc<dyn ChatRegistry>,
    ) -> Self {
        Self {
            staging,
            archive,
            registry,
        }
    }

    /// Copy a staged upload into the archive area under the same key, then record it.
    #[tracing::instrument(skip(self, email), fields(operation = "archive_and_record"))]
    pub async fn archive_and_record(
        &self,
        staged_key: &str,
        content_type: &str,
        name: &str,
        email: &str,
    ) -> Result<ChatRecord, AppError> {
        let data = self.staging.download(staged_key).await.map_err(|e| {
            AppError::ArchiveWrite(format!("Failed to read staged image {}: {}", staged_key, e))
        })?;

        self.archive_and_insert(staged_key, data, content_type, name, email)
            .await
    }

    /// Write bytes straight into the archive area and record them.
    #[tracing::instrument(skip(self, data, email), fields(operation = "register_direct", size_bytes = data.len()))]
    pub async fn register_direct(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        name: &str,
        email: &str,
    ) -> Result<ChatRecord, AppError> {
        self.archive_and_insert(key, data, content_type, name, email)
            .await
    }

    /// All registered cats, most recent first.
    pub async fn list_records(&self) -> Result<Vec<ChatRecord>, AppError> {
        self.registry.list_ordered().await
    }

    async fn archive_and_insert(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        name: &str,
        email: &str,
    ) -> Result<ChatRecord, AppError> {
        let archived_url = self
            .archive
            .upload_with_key(key, data, content_type)
            .await
            .map_err(|e| AppError::ArchiveWrite(e.to_string()))?;

        match self
            .registry
            .insert(NewChat::new(name, email, archived_url))
            .await
        {
            Ok(record) => {
                tracing::info!(id = record.id, archived_key = %key, "Cat registered");
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(
                    archived_key = %key,
                    error = %e,
                    "Registry insert failed; archived image left orphaned"
                );
                Err(AppError::RegistryInsert {
                    archived_key: key.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}
