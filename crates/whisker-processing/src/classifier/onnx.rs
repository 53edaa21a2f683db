//! Local ONNX inference backend.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ort::session::Session;
use whisker_core::constants::CAT_CLASS_INDEX;

use super::{CatScorer, ClassifierError};
use crate::tensor::InputTensor;

/// Runs an ONNX export of the cat model in-process.
pub struct OnnxScorer {
    // `Session::run` needs `&mut self`
    session: Arc<Mutex<Session>>,
}

impl OnnxScorer {
    pub fn load(model_path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let model_path = model_path.as_ref();
        if !model_path.exists() {
            return Err(ClassifierError::ModelInit(format!(
                "Model file not found: {}",
                model_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e: ort::Error| ClassifierError::ModelInit(format!("ONNX load failed: {e}")))?;

        tracing::info!(path = %model_path.display(), "ONNX cat model loaded");

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
        })
    }
}

fn infer(session: &Mutex<Session>, data: Vec<f32>) -> Result<f32, ClassifierError> {
    use ort::value::TensorRef;

    let array = ndarray::Array4::from_shape_vec(
        (
            InputTensor::SHAPE[0],
            InputTensor::SHAPE[1],
            InputTensor::SHAPE[2],
            InputTensor::SHAPE[3],
        ),
        data,
    )
    .map_err(|e| ClassifierError::Scorer(e.to_string()))?;

    let tensor =
        TensorRef::from_array_view(&array).map_err(|e| ClassifierError::Scorer(e.to_string()))?;

    let mut session = session
        .lock()
        .map_err(|_| ClassifierError::Scorer("Session lock poisoned".to_string()))?;

    let outputs = session
        .run(ort::inputs![tensor])
        .map_err(|e| ClassifierError::Scorer(format!("ONNX inference failed: {e}")))?;

    // Output shape: [1, classes]
    let (shape, output) = outputs[0]
        .try_extract_tensor::<f32>()
        .map_err(|e| ClassifierError::Scorer(format!("Output extraction: {e}")))?;

    if shape.len() != 2 || shape[0] != 1 || (shape[1] as usize) <= CAT_CLASS_INDEX {
        return Err(ClassifierError::Scorer(format!(
            "Unexpected output shape: {shape:?}"
        )));
    }

    Ok(output[CAT_CLASS_INDEX])
}

#[async_trait]
impl CatScorer for OnnxScorer {
    async fn score(&self, input: &InputTensor) -> Result<f32, ClassifierError> {
        let session = Arc::clone(&self.session);
        let data = input.data().to_vec();

        tokio::task::spawn_blocking(move || infer(&session, data))
            .await
            .map_err(|e| ClassifierError::Scorer(format!("Inference task failed: {}", e)))?
    }

    fn name(&self) -> &'static str {
        "onnx"
    }
}
