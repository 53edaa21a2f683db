//! Detection and registration services.

pub mod detection;
pub mod email;
pub mod notifier;
pub mod registration;

pub use detection::{
    DetectionOutcome, DetectionPipeline, DetectionReport, RegisterOutcome, UploadRequest,
};
pub use email::EmailNotifier;
pub use notifier::{notification_body, DisabledNotifier, Notifier};
pub use registration::RegistrationStore;
