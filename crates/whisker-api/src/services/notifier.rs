//! Owner notifications.

use async_trait::async_trait;

/// Tells an owner their cat was registered.
///
/// Best-effort: implementations absorb every failure, log it and return
/// `false`. The outcome never changes the detection result.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, email: &str, cat_name: &str) -> bool;
}

/// Installed when `EMAIL_NOTIFICATIONS_ENABLED=false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, email: &str, _cat_name: &str) -> bool {
        tracing::debug!(to = %email, "Email notifications disabled; skipping");
        false
    }
}

/// Plain-text body of the owner notification.
pub fn notification_body(cat_name: &str) -> String {
    format!("Hello,\n\nWe have detected your cat named '{}'.", cat_name)
}
