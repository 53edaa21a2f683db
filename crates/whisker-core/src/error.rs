//! Pipeline error taxonomy.
//!
//! Every failure the detection pipeline can surface is an [`AppError`]. Each
//! variant carries a fixed [`ErrorProfile`] that the HTTP layer turns into a
//! status code and response body. A rejected upload is not an error: it is the
//! pipeline's `NoFile` outcome.
//!
//! The `Database` variant wraps `sqlx::Error` when the `sqlx` feature is on.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Caller mistakes: bad multipart bodies, oversized uploads
    Debug,
    /// Upstream trouble the operator should see but not page on
    Warn,
    Error,
}

/// How an error presents itself to clients and to the logs.
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Stable machine-readable code, e.g. `CLASSIFICATION_FAILED`
    fn error_code(&self) -> &'static str;

    /// Whether resubmitting the same request may succeed
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message safe to show to the submitter
    fn client_message(&self) -> String;

    /// Sensitive errors never expose their details in a response
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    /// Writing the upload into the staging area failed
    #[error("Staging write failed: {0}")]
    Staging(String),

    /// Decode, scorer or score-range failure; never treated as "not a cat"
    #[error("Classification failed: {0}")]
    Classification(String),

    /// Copy into the archive area failed; no registry row was written
    #[error("Archive write failed: {0}")]
    ArchiveWrite(String),

    /// Registry insert failed after the archive copy succeeded
    #[error("Registry insert failed for archived image {archived_key}: {message}")]
    RegistryInsert {
        archived_key: String,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error: {message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Fixed presentation of one error kind.
#[derive(Debug, Clone, Copy)]
pub struct ErrorProfile {
    pub status: u16,
    pub code: &'static str,
    pub recoverable: bool,
    pub action: Option<&'static str>,
    pub sensitive: bool,
    pub level: LogLevel,
}

const RETRY_UPLOAD: Option<&str> = Some("Retry the upload after a short delay");

const DATABASE: ErrorProfile = ErrorProfile {
    status: 500,
    code: "DATABASE_ERROR",
    recoverable: true,
    action: Some("Retry after a short delay"),
    sensitive: true,
    level: LogLevel::Error,
};

const STAGING: ErrorProfile = ErrorProfile {
    status: 500,
    code: "STAGING_FAILED",
    recoverable: true,
    action: RETRY_UPLOAD,
    sensitive: true,
    level: LogLevel::Error,
};

// 502: the classifier is an upstream dependency
const CLASSIFICATION: ErrorProfile = ErrorProfile {
    status: 502,
    code: "CLASSIFICATION_FAILED",
    recoverable: true,
    action: Some("Check the image and retry; the classifier may be unavailable"),
    sensitive: false,
    level: LogLevel::Warn,
};

const ARCHIVE_WRITE: ErrorProfile = ErrorProfile {
    status: 500,
    code: "ARCHIVE_WRITE_FAILED",
    recoverable: true,
    action: RETRY_UPLOAD,
    sensitive: true,
    level: LogLevel::Error,
};

const REGISTRY_INSERT: ErrorProfile = ErrorProfile {
    status: 500,
    code: "REGISTRY_INSERT_FAILED",
    recoverable: true,
    action: RETRY_UPLOAD,
    sensitive: true,
    level: LogLevel::Error,
};

const INVALID_INPUT: ErrorProfile = ErrorProfile {
    status: 400,
    code: "INVALID_INPUT",
    recoverable: false,
    action: Some("Send a multipart form with an image field"),
    sensitive: false,
    level: LogLevel::Debug,
};

const PAYLOAD_TOO_LARGE: ErrorProfile = ErrorProfile {
    status: 413,
    code: "PAYLOAD_TOO_LARGE",
    recoverable: false,
    action: Some("Send a smaller photo"),
    sensitive: false,
    level: LogLevel::Debug,
};

const INTERNAL: ErrorProfile = ErrorProfile {
    status: 500,
    code: "INTERNAL_ERROR",
    recoverable: true,
    action: Some("Retry after a short delay"),
    sensitive: true,
    level: LogLevel::Error,
};

impl AppError {
    pub fn profile(&self) -> &'static ErrorProfile {
        match self {
            AppError::Database(_) => &DATABASE,
            AppError::Staging(_) => &STAGING,
            AppError::Classification(_) => &CLASSIFICATION,
            AppError::ArchiveWrite(_) => &ARCHIVE_WRITE,
            AppError::RegistryInsert { .. } => &REGISTRY_INSERT,
            AppError::InvalidInput(_) => &INVALID_INPUT,
            AppError::PayloadTooLarge(_) => &PAYLOAD_TOO_LARGE,
            AppError::Internal(_) | AppError::InternalWithSource { .. } => &INTERNAL,
        }
    }

    /// Variant name shown in non-production error bodies
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Database(_) => "Database",
            AppError::Staging(_) => "Staging",
            AppError::Classification(_) => "Classification",
            AppError::ArchiveWrite(_) => "ArchiveWrite",
            AppError::RegistryInsert { .. } => "RegistryInsert",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// The error followed by up to five causes, one per line.
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();
        let causes = std::iter::successors(self.source(), |&e| e.source());

        for (depth, cause) in causes.enumerate() {
            if depth == 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", cause));
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.profile().status
    }

    fn error_code(&self) -> &'static str {
        self.profile().code
    }

    fn is_recoverable(&self) -> bool {
        self.profile().recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        self.profile().action
    }

    fn is_sensitive(&self) -> bool {
        self.profile().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.profile().level
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access the cat registry".to_string(),
            AppError::Staging(_) => "Failed to store the uploaded image".to_string(),
            AppError::Classification(msg) => format!("Image classification failed: {}", msg),
            AppError::ArchiveWrite(_) => "Failed to archive the cat photo".to_string(),
            AppError::RegistryInsert { .. } => "Failed to register the cat".to_string(),
            AppError::InvalidInput(msg) | AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_errors_are_hidden_and_retryable() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::Database("pool closed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert!(err.is_recoverable());
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Failed to access the cat registry");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn classification_failure_is_bad_gateway() {
        let err = AppError::Classification("scorer returned 1.7".to_string());
        assert_eq!(err.http_status_code(), 502);
        assert_eq!(err.error_code(), "CLASSIFICATION_FAILED");
        assert!(!err.is_sensitive());
        assert!(err.client_message().contains("1.7"));
        assert_eq!(err.error_type(), "Classification");
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn archive_and_registry_failures_have_distinct_codes() {
        let archive = AppError::ArchiveWrite("disk full".to_string());
        assert_eq!(archive.http_status_code(), 500);
        assert_eq!(archive.error_code(), "ARCHIVE_WRITE_FAILED");

        let insert = AppError::RegistryInsert {
            archived_key: "1700000000.000001_abcd1234_cat.jpg".to_string(),
            message: "database is locked".to_string(),
        };
        assert_eq!(insert.http_status_code(), 500);
        assert_eq!(insert.error_code(), "REGISTRY_INSERT_FAILED");
        assert!(insert.to_string().contains("abcd1234_cat.jpg"));
        assert_eq!(insert.client_message(), "Failed to register the cat");
    }

    #[test]
    fn detailed_message_walks_the_source_chain() {
        let err = AppError::from(anyhow::anyhow!("inner cause").context("outer context"));
        let details = err.detailed_message();
        assert!(details.starts_with("Internal error: outer context"));
        assert!(details.contains("Caused by: inner cause"));
    }

    #[test]
    fn detailed_message_truncates_deep_chains() {
        let mut source = anyhow::anyhow!("level 0");
        for level in 1..10 {
            source = source.context(format!("level {}", level));
        }
        let err = AppError::from(source);
        let details = err.detailed_message();
        assert_eq!(details.matches("Caused by").count(), 5);
        assert!(details.ends_with("... (truncated)"));
    }

    #[test]
    fn caller_mistakes_are_not_recoverable() {
        let err = AppError::PayloadTooLarge("upload exceeds 10 MB".to_string());
        assert_eq!(err.http_status_code(), 413);
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "upload exceeds 10 MB");
        assert_eq!(err.suggested_action(), Some("Send a smaller photo"));

        let err = AppError::InvalidInput("missing boundary".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.log_level(), LogLevel::Debug);
    }
}
