//! Whisker processing library
//!
//! Upload validation, classifier input preparation and the cat classifier adapter
//! with its scoring backends.

pub mod classifier;
pub mod tensor;
pub mod validator;

pub use classifier::{
    build_scorer, CatScorer, ClassifierAdapter, ClassifierError, TfServingScorer,
};
#[cfg(feature = "onnx")]
pub use classifier::OnnxScorer;
pub use tensor::{preprocess, InputTensor};
pub use validator::{sanitize_filename, AcceptedName, ImageValidator, ValidationError};
