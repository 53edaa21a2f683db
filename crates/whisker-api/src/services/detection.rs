//! Detection pipeline orchestrator.
//!
//! One pass per upload, no retries:
//! validate, stage, classify, then (cats only) archive, record and notify.

use std::sync::Arc;

use whisker_core::models::{ChatRecord, DetectionResult};
use whisker_core::AppError;
use whisker_processing::{ClassifierAdapter, ImageValidator};
use whisker_storage::Storage;

use super::notifier::Notifier;
use super::registration::RegistrationStore;

/// Upload as extracted by the web layer.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub data: Vec<u8>,
    /// Declared filename; `None` when no file part was sent
    pub filename: Option<String>,
    /// Submitter's name for the cat, free text
    pub name: String,
    /// Owner email, free text, not validated
    pub email: String,
}

/// Everything a completed detection produced.
#[derive(Debug, Clone)]
pub struct DetectionReport {
    pub result: DetectionResult,
    /// Registry row, present only for cats
    pub record: Option<ChatRecord>,
    /// Notification result, present only when one was attempted
    pub notified: Option<bool>,
}

#[derive(Debug, Clone)]
pub enum DetectionOutcome {
    /// The upload had no acceptable image; nothing was stored or classified.
    NoFile,
    Completed(DetectionReport),
}

#[derive(Debug, Clone)]
pub enum RegisterOutcome {
    NoFile,
    Registered(ChatRecord),
}

#[derive(Clone)]
pub struct DetectionPipeline {
    validator: ImageValidator,
    staging: Arc<dyn Storage>,
    classifier: ClassifierAdapter,
    store: RegistrationStore,
    notifier: Arc<dyn Notifier>,
}

impl DetectionPipeline {
    pub fn new(
        validator: ImageValidator,
        staging: Arc<dyn Storage>,
        classifier: ClassifierAdapter,
        store: RegistrationStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            validator,
            staging,
            classifier,
            store,
            notifier,
        }
    }

    pub fn store(&self) -> &RegistrationStore {
        &self.store
    }

    /// Run an upload through the full detection flow.
    #[tracing::instrument(
        skip(self, request),
        fields(filename = ?request.filename, chat_name = %request.name, operation = "detect_cat")
    )]
    pub async fn process(&self, request: UploadRequest) -> Result<DetectionOutcome, AppError> {
        let accepted = match self.validator.validate(request.filename.as_deref()) {
            Ok(accepted) => accepted,
            Err(reason) => {
                tracing::info!(reason = %reason, "Upload rejected");
                return Ok(DetectionOutcome::NoFile);
            }
        };
        let key = accepted.storage_key.as_str();
        let content_type = accepted.content_type();

        let image_url = self
            .staging
            .upload_with_key(key, request.data, content_type)
            .await
            .map_err(|e| AppError::Staging(e.to_string()))?;

        // Classify what was actually staged.
        let staged = self
            .staging
            .download(key)
            .await
            .map_err(|e| AppError::Staging(e.to_string()))?;

        let classification = self.classifier.classify(staged).await?;
        let result = DetectionResult::new(classification, request.name.as_str(), image_url);

        if !classification.is_cat {
            tracing::info!(staged_key = %key, confidence = classification.confidence, "No cat detected");
            return Ok(DetectionOutcome::Completed(DetectionReport {
                result,
                record: None,
                notified: None,
            }));
        }

        let record = self
            .store
            .archive_and_record(key, content_type, &request.name, &request.email)
            .await?;

        let notified = self.notifier.notify(&request.email, &request.name).await;

        tracing::info!(
            id = record.id,
            confidence = classification.confidence,
            notified,
            "Cat detected and registered"
        );

        Ok(DetectionOutcome::Completed(DetectionReport {
            result,
            record: Some(record),
            notified: Some(notified),
        }))
    }

    /// Register an upload as a cat without classifying it.
    #[tracing::instrument(
        skip(self, request),
        fields(filename = ?request.filename, chat_name = %request.name, operation = "register_existing")
    )]
    pub async fn register_existing(
        &self,
        request: UploadRequest,
    ) -> Result<RegisterOutcome, AppError> {
        let accepted = match self.validator.validate(request.filename.as_deref()) {
            Ok(accepted) => accepted,
            Err(reason) => {
                tracing::info!(reason = %reason, "Registration upload rejected");
                return Ok(RegisterOutcome::NoFile);
            }
        };

        let record = self
            .store
            .register_direct(
                &accepted.storage_key,
                request.data,
                accepted.content_type(),
                &request.name,
                &request.email,
            )
            .await?;

        Ok(RegisterOutcome::Registered(record))
    }
}
