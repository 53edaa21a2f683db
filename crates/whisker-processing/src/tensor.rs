//! Classifier input preparation.
//!
//! The model was trained on images loaded at 224x224 with nearest-neighbour
//! resampling and intensities scaled to [0, 1]; inference input must match.

use image::imageops::{self, FilterType};
use whisker_core::constants::{CLASSIFIER_INPUT_CHANNELS, CLASSIFIER_INPUT_SIZE};

use crate::classifier::ClassifierError;

const SIDE: usize = CLASSIFIER_INPUT_SIZE as usize;

/// Batch of one image, `[1, 224, 224, 3]` row-major NHWC.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    data: Vec<f32>,
}

impl InputTensor {
    pub const SHAPE: [usize; 4] = [1, SIDE, SIDE, CLASSIFIER_INPUT_CHANNELS];
    pub const LEN: usize = SIDE * SIDE * CLASSIFIER_INPUT_CHANNELS;

    pub fn from_raw(data: Vec<f32>) -> Result<Self, ClassifierError> {
        if data.len() != Self::LEN {
            return Err(ClassifierError::Decode(format!(
                "Expected {} tensor values, got {}",
                Self::LEN,
                data.len()
            )));
        }
        Ok(Self { data })
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// The single image as nested `[height][width][channel]` rows.
    pub fn to_nested(&self) -> Vec<Vec<[f32; CLASSIFIER_INPUT_CHANNELS]>> {
        self.data
            .chunks_exact(SIDE * CLASSIFIER_INPUT_CHANNELS)
            .map(|row| {
                row.chunks_exact(CLASSIFIER_INPUT_CHANNELS)
                    .map(|px| [px[0], px[1], px[2]])
                    .collect()
            })
            .collect()
    }
}

/// Decode image bytes into the classifier input tensor.
///
/// CPU-bound; async callers should run it on a blocking thread.
pub fn preprocess(bytes: &[u8]) -> Result<InputTensor, ClassifierError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| ClassifierError::Decode(format!("Failed to decode image: {}", e)))?;

    let rgb = decoded.to_rgb8();
    let resized = imageops::resize(
        &rgb,
        CLASSIFIER_INPUT_SIZE,
        CLASSIFIER_INPUT_SIZE,
        FilterType::Nearest,
    );

    let data: Vec<f32> = resized
        .into_raw()
        .into_iter()
        .map(|v| f32::from(v) / 255.0)
        .collect();

    InputTensor::from_raw(data)
}
