use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Scoring backend used by the classifier adapter.
///
/// Defined in core because it is selected from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierBackend {
    /// TensorFlow Serving REST `:predict` endpoint
    TfServing,
    /// Local ONNX model (requires the `onnx` feature)
    Onnx,
}

impl FromStr for ClassifierBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tf-serving" | "tfserving" | "tensorflow-serving" => Ok(ClassifierBackend::TfServing),
            "onnx" => Ok(ClassifierBackend::Onnx),
            _ => Err(anyhow::anyhow!("Invalid classifier backend: {}", s)),
        }
    }
}

impl Display for ClassifierBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ClassifierBackend::TfServing => write!(f, "tf-serving"),
            ClassifierBackend::Onnx => write!(f, "onnx"),
        }
    }
}

/// Transport security for the SMTP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// Implicit TLS (SMTPS)
    Tls,
    /// Plain connection upgraded with STARTTLS
    StartTls,
    /// Unencrypted, for local relays only
    None,
}

impl SmtpSecurity {
    /// Port used when `SMTP_PORT` is not set.
    pub fn default_port(&self) -> u16 {
        match self {
            SmtpSecurity::Tls => 465,
            SmtpSecurity::StartTls => 587,
            SmtpSecurity::None => 25,
        }
    }
}

impl FromStr for SmtpSecurity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tls" | "ssl" | "smtps" => Ok(SmtpSecurity::Tls),
            "starttls" => Ok(SmtpSecurity::StartTls),
            "none" | "plain" => Ok(SmtpSecurity::None),
            _ => Err(anyhow::anyhow!("Invalid SMTP security mode: {}", s)),
        }
    }
}

impl Display for SmtpSecurity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SmtpSecurity::Tls => write!(f, "tls"),
            SmtpSecurity::StartTls => write!(f, "starttls"),
            SmtpSecurity::None => write!(f, "none"),
        }
    }
}

/// Console log formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}
