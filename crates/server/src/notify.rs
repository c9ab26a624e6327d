//! Lead notifications.
//!
//! A [`Lead`] is someone who left contact details, either on the lead form or
//! alongside an audit request. Delivery goes through the [`LeadNotifier`]
//! trait so handlers never touch credentials or transports directly.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::NotifierConfig;

/// Errors from sending a lead notification.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("mail API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail API rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Contact details submitted by a visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Lead {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

fn or_unknown(value: Option<&str>) -> &str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or("(not given)")
}

impl Lead {
    pub fn subject(&self) -> String {
        format!("New SEO audit lead from {}", or_unknown(self.name.as_deref()))
    }

    pub fn body(&self) -> String {
        format!(
            "New SEO audit lead\n\nName: {}\nEmail: {}\n\nMessage:\n{}",
            or_unknown(self.name.as_deref()),
            or_unknown(self.email.as_deref()),
            or_unknown(self.message.as_deref()),
        )
    }
}

/// Delivers lead notifications.
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    async fn notify(&self, lead: &Lead) -> Result<(), NotifyError>;
}

/// Writes leads to the log instead of sending mail.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl LeadNotifier for LogNotifier {
    async fn notify(&self, lead: &Lead) -> Result<(), NotifyError> {
        tracing::info!(subject = %lead.subject(), email = ?lead.email, "lead received (mail delivery not configured)");
        Ok(())
    }
}

#[derive(Serialize)]
struct MailAddress<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MailMessage<'a> {
    sender: MailAddress<'a>,
    to: Vec<MailAddress<'a>>,
    subject: String,
    text_content: String,
}

/// Sends leads through a transactional-email HTTP API.
///
/// The request body follows the Brevo v3 `smtp/email` shape and the key is
/// sent in the `api-key` header.
#[derive(Debug, Clone)]
pub struct EmailApiNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    sender: String,
    recipient: String,
}

impl EmailApiNotifier {
    pub fn new(
        endpoint: impl Into<String>, api_key: impl Into<String>, sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            sender: sender.into(),
            recipient: recipient.into(),
        })
    }
}

#[async_trait]
impl LeadNotifier for EmailApiNotifier {
    async fn notify(&self, lead: &Lead) -> Result<(), NotifyError> {
        let message = MailMessage {
            sender: MailAddress { email: &self.sender },
            to: vec![MailAddress { email: &self.recipient }],
            subject: lead.subject(),
            text_content: lead.body(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected { status: status.as_u16(), body });
        }

        tracing::info!(subject = %message.subject, "lead notification sent");
        Ok(())
    }
}

/// Builds the notifier for a configuration.
///
/// Falls back to [`LogNotifier`] unless key, sender and recipient are all set.
pub fn notifier_from_config(config: &NotifierConfig) -> Arc<dyn LeadNotifier> {
    match (&config.mail_api_key, &config.mail_sender, &config.mail_recipient) {
        (Some(key), Some(sender), Some(recipient)) => {
            match EmailApiNotifier::new(&config.mail_api_url, key, sender, recipient) {
                Ok(notifier) => Arc::new(notifier),
                Err(e) => {
                    tracing::warn!(error = %e, "could not build mail client, logging leads instead");
                    Arc::new(LogNotifier)
                }
            }
        }
        _ => {
            tracing::warn!("mail API key, sender or recipient not set, logging leads instead");
            Arc::new(LogNotifier)
        }
    }
}
