//! Email notifier sending owner notifications via SMTP.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use whisker_core::constants::NOTIFICATION_SUBJECT;
use whisker_core::{Config, SmtpSecurity};

use super::notifier::{notification_body, Notifier};

const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// SMTP notifier. Failures are logged and reported as `false`.
#[derive(Clone)]
pub struct EmailNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailNotifier {
    /// Create the notifier from config. Returns `Ok(None)` if notifications are disabled.
    pub fn from_config(config: &Config) -> Result<Option<Self>, anyhow::Error> {
        if !config.email_notifications_enabled() {
            tracing::debug!("Email notifications disabled (EMAIL_NOTIFICATIONS_ENABLED=false)");
            return Ok(None);
        }

        let host = config
            .smtp_host()
            .ok_or_else(|| anyhow::anyhow!("SMTP_HOST is required for email notifications"))?;
        let from: Mailbox = config
            .smtp_from()
            .ok_or_else(|| anyhow::anyhow!("SMTP_FROM is required for email notifications"))?
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid SMTP_FROM: {}", e))?;
        let port = config.smtp_port();
        let security = config.smtp_security();

        let builder = match security {
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(host)?,
            SmtpSecurity::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?,
            SmtpSecurity::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
        };
        let builder = builder.port(port).timeout(Some(SMTP_TIMEOUT));
        let builder = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
            builder.credentials(Credentials::new(u.to_string(), p.to_string()))
        } else {
            builder
        };

        tracing::info!(
            host = %host,
            port = port,
            security = %security,
            "Email notifier initialized"
        );

        Ok(Some(Self {
            mailer: builder.build(),
            from,
        }))
    }

    async fn send(&self, to: &str, cat_name: &str) -> Result<(), String> {
        let to_addr: Mailbox = to
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to_addr)
            .subject(NOTIFICATION_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(notification_body(cat_name))
            .map_err(|e| e.to_string())?;

        self.mailer.send(email).await.map_err(|e| e.to_string())?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    #[tracing::instrument(skip(self), fields(operation = "notify_owner"))]
    async fn notify(&self, email: &str, cat_name: &str) -> bool {
        match self.send(email, cat_name).await {
            Ok(()) => {
                tracing::info!(to = %email, "Owner notification sent");
                true
            }
            Err(e) => {
                tracing::warn!(to = %email, error = %e, "Owner notification failed");
                false
            }
        }
    }
}
