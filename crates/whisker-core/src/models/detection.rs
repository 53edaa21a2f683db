use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{CAT_THRESHOLD, MESSAGE_CAT_DETECTED, MESSAGE_NO_CAT_DETECTED};

/// Decision returned by the classifier adapter.
///
/// `confidence` keeps full precision; formatting happens when the
/// result payload is assembled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    pub is_cat: bool,
    pub confidence: f32,
}

impl ClassificationResult {
    /// Apply the fixed decision threshold to a raw score.
    pub fn from_score(score: f32) -> Self {
        Self {
            is_cat: score > CAT_THRESHOLD,
            confidence: score,
        }
    }
}

/// Payload rendered for a completed detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DetectionResult {
    pub is_cat: bool,
    /// Name submitted with the upload (may be empty)
    pub chat_name: String,
    /// Public URL of the staged upload
    pub image_url: String,
    pub message: String,
    /// Classifier score with exactly two decimals, e.g. "0.92"
    #[schema(example = "0.92")]
    pub confidence: String,
}

impl DetectionResult {
    pub fn new(
        classification: ClassificationResult,
        chat_name: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        let message = if classification.is_cat {
            MESSAGE_CAT_DETECTED
        } else {
            MESSAGE_NO_CAT_DETECTED
        };
        Self {
            is_cat: classification.is_cat,
            chat_name: chat_name.into(),
            image_url: image_url.into(),
            message: message.to_string(),
            confidence: format!("{:.2}", classification.confidence),
        }
    }
}
