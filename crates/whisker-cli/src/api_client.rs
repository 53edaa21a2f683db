//! HTTP client for the Whisker API.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{redirect, StatusCode};
use serde::Deserialize;
use whisker_core::models::{ChatRecord, DetectionResult};

const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read {path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },

    /// Server answered with an error payload
    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Unexpected response: {0}")]
    Unexpected(String),
}

/// Outcome of posting a photo.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    Accepted(T),
    /// The server redirected back to the form: the file was not an acceptable image.
    Rejected,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
    code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
    pub storage: String,
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        // Redirects carry meaning here, so they are never followed.
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Uses `WHISKER_API_URL`, defaulting to `http://localhost:5000`.
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url =
            std::env::var("WHISKER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a photo for detection.
    pub async fn detect(
        &self,
        image: &Path,
        name: &str,
        email: &str,
    ) -> Result<Submission<DetectionResult>, ClientError> {
        let form = Form::new()
            .part("image", file_part(image).await?)
            .text("name", name.to_string())
            .text("email", email.to_string());

        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;

        if response.status().is_redirection() {
            return Ok(Submission::Rejected);
        }
        let response = error_for_status(response).await?;
        Ok(Submission::Accepted(response.json().await?))
    }

    /// Register a known cat without classification.
    pub async fn register(
        &self,
        image: &Path,
        name: &str,
        email: &str,
    ) -> Result<Submission<()>, ClientError> {
        let form = Form::new()
            .part("image", file_part(image).await?)
            .text("chat_name", name.to_string())
            .text("owner_email", email.to_string());

        let response = self
            .client
            .post(format!("{}/register", self.base_url))
            .multipart(form)
            .send()
            .await?;

        if response.status().is_redirection() {
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            return Ok(if location == "/" {
                Submission::Accepted(())
            } else {
                Submission::Rejected
            });
        }

        let response = error_for_status(response).await?;
        Err(ClientError::Unexpected(format!(
            "expected a redirect, got {}",
            response.status()
        )))
    }

    /// All registered cats, most recent first.
    pub async fn list_chats(&self) -> Result<Vec<ChatRecord>, ClientError> {
        let response = self
            .client
            .get(format!("{}/chats", self.base_url))
            .send()
            .await?;
        let response = error_for_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        // 503 still carries a health body
        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            return Ok(response.json().await?);
        }
        let response = error_for_status(response).await?;
        Ok(response.json().await?)
    }
}

async fn file_part(path: &Path) -> Result<Part, ClientError> {
    let data = tokio::fs::read(path).await.map_err(|source| ClientError::File {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Part::bytes(data).file_name(file_name))
}

async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(err) => Err(ClientError::Api {
            status: status.as_u16(),
            code: err.code,
            message: err.error,
        }),
        Err(_) => Err(ClientError::Api {
            status: status.as_u16(),
            code: "UNKNOWN".to_string(),
            message: body,
        }),
    }
}
