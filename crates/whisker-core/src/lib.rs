//! Whisker Core Library
//!
//! This crate provides the domain models, error types, configuration and constants
//! shared by every Whisker component.

pub mod backend_types;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use backend_types::{ClassifierBackend, LogFormat, SmtpSecurity};
pub use config::{BaseConfig, Config, WhiskerConfig};
pub use error::{AppError, ErrorMetadata, ErrorProfile, LogLevel};
