//! Configuration module
//!
//! This module provides the configuration structures for the API server: database,
//! staging and archive storage, classifier backend and SMTP notification settings.
//! Values come from the process environment (optionally seeded from a `.env` file).

use std::env;
use std::str::FromStr;

use crate::backend_types::{ClassifierBackend, LogFormat, SmtpSecurity};

// Common constants
const SERVER_PORT: u16 = 5000;
const MAX_CONNECTIONS: u32 = 5;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_FILE_SIZE_MB: usize = 10;
const CLASSIFIER_TIMEOUT_SECS: u64 = 30;

/// Base configuration shared by every binary
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
    pub log_format: LogFormat,
}

/// Detection service configuration
#[derive(Clone, Debug)]
pub struct WhiskerConfig {
    pub base: BaseConfig,
    pub database_url: String,
    // Storage areas
    pub staging_dir: String,
    pub staging_base_url: String,
    pub archive_dir: String,
    pub archive_base_url: String,
    pub max_file_size_bytes: usize,
    // Classifier
    pub classifier_backend: ClassifierBackend,
    pub classifier_url: String,
    pub classifier_timeout_seconds: u64,
    pub model_path: String,
    // Owner notifications
    pub email_notifications_enabled: bool,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
    pub smtp_security: SmtpSecurity,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<WhiskerConfig>);

impl Config {
    fn as_whisker(&self) -> &WhiskerConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_whisker().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = WhiskerConfig::from_lookup(lookup)?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_whisker().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_whisker().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_whisker().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_whisker().base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.as_whisker().base.log_format
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_whisker().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_whisker().base.db_timeout_seconds
    }

    pub fn database_url(&self) -> &str {
        &self.as_whisker().database_url
    }

    pub fn staging_dir(&self) -> &str {
        &self.as_whisker().staging_dir
    }

    pub fn staging_base_url(&self) -> &str {
        &self.as_whisker().staging_base_url
    }

    pub fn archive_dir(&self) -> &str {
        &self.as_whisker().archive_dir
    }

    pub fn archive_base_url(&self) -> &str {
        &self.as_whisker().archive_base_url
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.as_whisker().max_file_size_bytes
    }

    pub fn classifier_backend(&self) -> ClassifierBackend {
        self.as_whisker().classifier_backend
    }

    pub fn classifier_url(&self) -> &str {
        &self.as_whisker().classifier_url
    }

    pub fn classifier_timeout_seconds(&self) -> u64 {
        self.as_whisker().classifier_timeout_seconds
    }

    pub fn model_path(&self) -> &str {
        &self.as_whisker().model_path
    }

    pub fn email_notifications_enabled(&self) -> bool {
        self.as_whisker().email_notifications_enabled
    }

    pub fn smtp_host(&self) -> Option<&str> {
        self.as_whisker().smtp_host.as_deref()
    }

    /// Configured port, or the default for the security mode.
    pub fn smtp_port(&self) -> u16 {
        let config = self.as_whisker();
        config
            .smtp_port
            .unwrap_or_else(|| config.smtp_security.default_port())
    }

    pub fn smtp_user(&self) -> Option<&str> {
        self.as_whisker().smtp_user.as_deref()
    }

    pub fn smtp_password(&self) -> Option<&str> {
        self.as_whisker().smtp_password.as_deref()
    }

    pub fn smtp_from(&self) -> Option<&str> {
        self.as_whisker().smtp_from.as_deref()
    }

    pub fn smtp_security(&self) -> SmtpSecurity {
        self.as_whisker().smtp_security
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| v.trim().to_lowercase())
        .and_then(|v| match v.as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl WhiskerConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_format = match non_empty(lookup("LOG_FORMAT")) {
            Some(value) => LogFormat::from_str(&value)?,
            None => LogFormat::default(),
        };

        let base = BaseConfig {
            server_port: lookup("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: lookup("DB_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
            log_format,
        };

        let max_file_size_mb = lookup("MAX_FILE_SIZE_MB")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(MAX_FILE_SIZE_MB);

        let classifier_backend = match non_empty(lookup("CLASSIFIER_BACKEND")) {
            Some(value) => ClassifierBackend::from_str(&value)?,
            None => ClassifierBackend::TfServing,
        };

        let smtp_security = match non_empty(lookup("SMTP_SECURITY")) {
            Some(value) => SmtpSecurity::from_str(&value)?,
            None => SmtpSecurity::Tls,
        };

        let config = WhiskerConfig {
            base,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://chat_database.db".to_string()),
            staging_dir: lookup("STAGING_DIR").unwrap_or_else(|| "static/uploads".to_string()),
            staging_base_url: lookup("STAGING_BASE_URL")
                .unwrap_or_else(|| "/static/uploads".to_string()),
            archive_dir: lookup("ARCHIVE_DIR")
                .unwrap_or_else(|| "static/enregistres".to_string()),
            archive_base_url: lookup("ARCHIVE_BASE_URL")
                .unwrap_or_else(|| "/static/enregistres".to_string()),
            max_file_size_bytes: max_file_size_mb
                .checked_mul(1024 * 1024)
                .ok_or_else(|| anyhow::anyhow!("MAX_FILE_SIZE_MB is too large"))?,
            classifier_backend,
            classifier_url: lookup("CLASSIFIER_URL").unwrap_or_else(|| {
                "http://localhost:8501/v1/models/chat_recognition:predict".to_string()
            }),
            classifier_timeout_seconds: lookup("CLASSIFIER_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CLASSIFIER_TIMEOUT_SECS),
            model_path: lookup("MODEL_PATH")
                .unwrap_or_else(|| "chat_recognition_model.onnx".to_string()),
            email_notifications_enabled: parse_bool(lookup("EMAIL_NOTIFICATIONS_ENABLED"), false),
            smtp_host: non_empty(lookup("SMTP_HOST")),
            smtp_port: lookup("SMTP_PORT")
                .and_then(|s| s.parse().ok())
                .filter(|&p| p > 0),
            smtp_user: non_empty(lookup("SMTP_USER")),
            smtp_password: non_empty(lookup("SMTP_PASSWORD")),
            smtp_from: non_empty(lookup("SMTP_FROM")),
            smtp_security,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("sqlite:") {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a SQLite connection string (sqlite://...)"
            ));
        }

        if self.staging_dir.trim().is_empty() || self.archive_dir.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "STAGING_DIR and ARCHIVE_DIR must not be empty"
            ));
        }

        if self.staging_dir == self.archive_dir {
            return Err(anyhow::anyhow!(
                "STAGING_DIR and ARCHIVE_DIR must point to different directories"
            ));
        }

        for (var, url) in [
            ("STAGING_BASE_URL", &self.staging_base_url),
            ("ARCHIVE_BASE_URL", &self.archive_base_url),
        ] {
            if !url.starts_with('/') || url.trim_end_matches('/').is_empty() {
                return Err(anyhow::anyhow!(
                    "{} must be an absolute path below the root (e.g. /static/uploads)",
                    var
                ));
            }
        }

        if self.staging_base_url.trim_end_matches('/') == self.archive_base_url.trim_end_matches('/') {
            return Err(anyhow::anyhow!(
                "STAGING_BASE_URL and ARCHIVE_BASE_URL must differ"
            ));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than zero"));
        }

        if self.email_notifications_enabled
            && (self.smtp_host.is_none() || self.smtp_from.is_none())
        {
            return Err(anyhow::anyhow!(
                "EMAIL_NOTIFICATIONS_ENABLED=true requires SMTP_HOST and SMTP_FROM to be set"
            ));
        }

        Ok(())
    }
}
