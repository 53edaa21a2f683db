//! Whisker Storage Library
//!
//! This crate provides the storage abstraction used for the two file areas of the
//! pipeline: the staging area, which receives every accepted upload, and the archive
//! area, which holds copies of registered cat photos.
//!
//! # Storage key format
//!
//! Keys are flat generated file names (`{secs}.{micros}_{suffix}_{name}`). A key never
//! contains a path separator or `..` and never starts with a dot.

pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
