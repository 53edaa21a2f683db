//! Whisker API Library
//!
//! HTTP surface, detection pipeline services and application setup.

// Module declarations
mod api_doc;
mod handlers;
mod utils;

// Public modules
pub mod error;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::{
    DetectionOutcome, DetectionPipeline, DetectionReport, Notifier, RegisterOutcome,
    RegistrationStore, UploadRequest,
};
