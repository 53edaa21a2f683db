//! Cat classifier adapter and scoring backends.

pub mod adapter;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod tf_serving;

use std::sync::Arc;

use async_trait::async_trait;
use whisker_core::{AppError, ClassifierBackend, Config};

use crate::tensor::InputTensor;

pub use adapter::ClassifierAdapter;
#[cfg(feature = "onnx")]
pub use onnx::OnnxScorer;
pub use tf_serving::TfServingScorer;

/// Classifier failures. None of these may be read as "not a cat".
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Scorer failed: {0}")]
    Scorer(String),

    #[error("Score out of range: {0}")]
    InvalidScore(f32),

    #[error("Classifier initialization failed: {0}")]
    ModelInit(String),
}

impl From<ClassifierError> for AppError {
    fn from(err: ClassifierError) -> Self {
        AppError::Classification(err.to_string())
    }
}

/// Maps a preprocessed image to the probability that it shows a cat.
#[async_trait]
pub trait CatScorer: Send + Sync {
    async fn score(&self, input: &InputTensor) -> Result<f32, ClassifierError>;

    /// Backend name for logs
    fn name(&self) -> &'static str;
}

/// Build the scorer selected by `CLASSIFIER_BACKEND`.
pub fn build_scorer(config: &Config) -> Result<Arc<dyn CatScorer>, ClassifierError> {
    match config.classifier_backend() {
        ClassifierBackend::TfServing => {
            let scorer = TfServingScorer::new(
                config.classifier_url(),
                std::time::Duration::from_secs(config.classifier_timeout_seconds()),
            )?;
            Ok(Arc::new(scorer))
        }
        #[cfg(feature = "onnx")]
        ClassifierBackend::Onnx => Ok(Arc::new(OnnxScorer::load(config.model_path())?)),
        #[cfg(not(feature = "onnx"))]
        ClassifierBackend::Onnx => Err(ClassifierError::ModelInit(
            "CLASSIFIER_BACKEND=onnx requires building with the `onnx` feature".to_string(),
        )),
    }
}
