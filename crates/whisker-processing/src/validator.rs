//! Upload filename validation and storage name generation.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use whisker_core::constants::{ALLOWED_EXTENSIONS, MAX_STORAGE_KEY_LENGTH};

const MAX_FILENAME_LENGTH: usize = 255;

/// Reasons an upload is not accepted.
///
/// A rejection is not a failure: the pipeline answers it with the "no file"
/// outcome and performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No file name provided")]
    MissingFilename,

    #[error("File name has no extension: {0}")]
    MissingExtension(String),

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },
}

/// A filename that passed validation, with the unique storage key derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedName {
    /// Key used in both the staging and archive areas
    pub storage_key: String,
    /// Lowercased extension
    pub extension: String,
    /// Filename as submitted
    pub original: String,
}

impl AcceptedName {
    pub fn content_type(&self) -> &'static str {
        match self.extension.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            _ => "application/octet-stream",
        }
    }
}

/// Image upload validator
///
/// Checks the extension allow-list and derives a collision-resistant storage
/// name. Has no side effects.
#[derive(Debug, Clone)]
pub struct ImageValidator {
    allowed_extensions: Vec<String>,
}

impl Default for ImageValidator {
    fn default() -> Self {
        Self::new(ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect())
    }
}

impl ImageValidator {
    pub fn new(allowed_extensions: Vec<String>) -> Self {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    /// Validate an upload filename and name it for storage using the current time.
    pub fn validate(&self, filename: Option<&str>) -> Result<AcceptedName, ValidationError> {
        let suffix = Uuid::new_v4().simple().to_string();
        self.validate_at(filename, Utc::now(), &suffix[..8])
    }

    /// Same as [`validate`](Self::validate) with the clock and suffix supplied.
    pub fn validate_at(
        &self,
        filename: Option<&str>,
        now: DateTime<Utc>,
        suffix: &str,
    ) -> Result<AcceptedName, ValidationError> {
        let filename = filename
            .filter(|f| !f.is_empty())
            .ok_or(ValidationError::MissingFilename)?;
        let extension = self.validate_extension(filename)?;

        let mut sanitized = sanitize_filename(filename);
        if !sanitized.to_lowercase().ends_with(&format!(".{}", extension)) {
            sanitized = format!("image.{}", extension);
        }

        Ok(AcceptedName {
            storage_key: storage_key(now, suffix, &sanitized),
            extension,
            original: filename.to_string(),
        })
    }

    /// Check the last dot-delimited segment against the allow-list.
    pub fn validate_extension(&self, filename: &str) -> Result<String, ValidationError> {
        let (_, extension) = filename
            .rsplit_once('.')
            .ok_or_else(|| ValidationError::MissingExtension(filename.to_string()))?;
        let extension = extension.to_lowercase();

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(extension)
    }
}

/// `{secs}.{micros}_{suffix}_{name}`, UTC with microsecond resolution.
///
/// The name is shortened, extension kept, so the whole key stays within
/// [`MAX_STORAGE_KEY_LENGTH`].
pub fn storage_key(now: DateTime<Utc>, suffix: &str, sanitized: &str) -> String {
    let prefix = format!(
        "{}.{:06}_{}_",
        now.timestamp(),
        now.timestamp_subsec_micros(),
        suffix
    );
    let room = MAX_STORAGE_KEY_LENGTH.saturating_sub(prefix.len());
    format!("{}{}", prefix, truncate_keeping_extension(sanitized, room))
}

/// Reduce a client-supplied filename to a safe single path component.
///
/// Keeps the last component, maps anything outside `[A-Za-z0-9._-]` to `_`,
/// collapses `..` runs, strips leading dots and caps the length while keeping
/// the extension.
pub fn sanitize_filename(filename: &str) -> String {
    let last_component = filename.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(filename);

    let mut sanitized: String = last_component
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    while sanitized.contains("..") {
        sanitized = sanitized.replace("..", ".");
    }

    truncate_keeping_extension(sanitized.trim_start_matches('.'), MAX_FILENAME_LENGTH)
}

// Callers pass ASCII only, so byte slicing is safe.
fn truncate_keeping_extension(name: &str, max: usize) -> String {
    if name.len() <= max {
        return name.to_string();
    }

    match name.rsplit_once('.') {
        Some((stem, ext)) if ext.len() < 16 && ext.len() < max => {
            let keep = max - ext.len() - 1;
            format!("{}.{}", &stem[..keep.min(stem.len())], ext)
        }
        _ => name[..max].to_string(),
    }
}
