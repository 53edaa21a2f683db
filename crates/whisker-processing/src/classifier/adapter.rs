use std::sync::Arc;

use whisker_core::models::ClassificationResult;

use super::{CatScorer, ClassifierError};
use crate::tensor::preprocess;

/// Wraps a scorer with preprocessing and the fixed decision threshold.
#[derive(Clone)]
pub struct ClassifierAdapter {
    scorer: Arc<dyn CatScorer>,
}

impl ClassifierAdapter {
    pub fn new(scorer: Arc<dyn CatScorer>) -> Self {
        Self { scorer }
    }

    /// Classify encoded image bytes. Invokes the scorer exactly once.
    #[tracing::instrument(skip(self, image), fields(scorer = self.scorer.name(), size_bytes = image.len()))]
    pub async fn classify(&self, image: Vec<u8>) -> Result<ClassificationResult, ClassifierError> {
        let tensor = tokio::task::spawn_blocking(move || preprocess(&image))
            .await
            .map_err(|e| ClassifierError::Decode(format!("Preprocessing task failed: {}", e)))??;

        let score = self.scorer.score(&tensor).await?;

        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            tracing::warn!(score, "Scorer returned a value outside [0, 1]");
            return Err(ClassifierError::InvalidScore(score));
        }

        let result = ClassificationResult::from_score(score);
        tracing::info!(score, is_cat = result.is_cat, "Image classified");

        Ok(result)
    }
}
