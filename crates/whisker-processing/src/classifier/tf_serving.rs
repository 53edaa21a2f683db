//! TensorFlow Serving REST backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use whisker_core::constants::CAT_CLASS_INDEX;

use super::{CatScorer, ClassifierError};
use crate::tensor::InputTensor;

#[derive(Debug, Deserialize)]
struct PredictResponse {
    predictions: Vec<Vec<f32>>,
}

/// Scores images through a TensorFlow Serving `:predict` endpoint.
pub struct TfServingScorer {
    client: reqwest::Client,
    url: String,
}

impl TfServingScorer {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierError::ModelInit(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl CatScorer for TfServingScorer {
    async fn score(&self, input: &InputTensor) -> Result<f32, ClassifierError> {
        let body = serde_json::json!({ "instances": [input.to_nested()] });

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClassifierError::Scorer(format!("Request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Scorer(format!(
                "Model server returned {}: {}",
                status, text
            )));
        }

        let predictions: PredictResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::Scorer(format!("Invalid predict response: {}", e)))?;

        predictions
            .predictions
            .first()
            .and_then(|row| row.get(CAT_CLASS_INDEX))
            .copied()
            .ok_or_else(|| ClassifierError::Scorer("Predict response has no score".to_string()))
    }

    fn name(&self) -> &'static str {
        "tf-serving"
    }
}
