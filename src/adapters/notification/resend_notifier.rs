//! Resend Notifier - Delivers hand-off packages as e-mail.
//!
//! Sends one plain-text message per package through
//! `POST https://api.resend.com/emails`. No retries: a failed send is reported
//! to the user, who can approve again.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::ports::{Notification, NotificationError, Notifier};

/// Resend e-mail endpoint.
pub const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Configuration for the Resend notifier.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    api_key: Secret<String>,
    /// Formatted sender, e.g. `Idea Intake <intake@example.com>`.
    pub from: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl ResendConfig {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            from: from.into(),
            api_url: RESEND_API_URL.to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// E-mail notifier backed by Resend.
pub struct ResendNotifier {
    config: ResendConfig,
    client: Client,
}

impl ResendNotifier {
    /// # Errors
    ///
    /// Returns `NotificationError::Network` if the HTTP client cannot be built.
    pub fn new(config: ResendConfig) -> Result<Self, NotificationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NotificationError::network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn to_email<'a>(&'a self, notification: &'a Notification) -> ResendEmail<'a> {
        ResendEmail {
            from: &self.config.from,
            to: vec![notification.recipient.as_str()],
            subject: &notification.subject,
            text: &notification.body,
        }
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&self.to_email(notification))
            .send()
            .await
            .map_err(|e| NotificationError::network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(recipient = %notification.recipient, "Hand-off e-mail accepted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            401 | 403 => NotificationError::Unauthorized,
            code => NotificationError::rejected(code, body),
        })
    }
}

#[derive(Debug, Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
}
