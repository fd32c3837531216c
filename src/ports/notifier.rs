//! Notifier port for delivering finished intake packages.
//!
//! Implementations send the package to the delivery team (e-mail in
//! production, an in-memory recorder in tests). A returned `Ok` means the
//! package was accepted for delivery.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::intake::HandoffPackage;

/// Port for outbound team notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one notification.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the notification was not accepted.
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// A message for the delivery team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
    pub recipient: String,
}

impl Notification {
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            recipient: recipient.into(),
        }
    }
}

impl From<HandoffPackage> for Notification {
    fn from(package: HandoffPackage) -> Self {
        Self {
            subject: package.subject,
            body: package.body,
            recipient: package.recipient,
        }
    }
}

/// Notification delivery errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotificationError {
    /// Provider rejected the API key.
    #[error("notification provider rejected credentials")]
    Unauthorized,

    /// Provider refused the message.
    #[error("notification rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Could not reach the provider.
    #[error("network error: {0}")]
    Network(String),
}

impl NotificationError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }
}
