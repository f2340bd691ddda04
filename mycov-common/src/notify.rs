//! Outbound chat notifications

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::{Error, Result};

/// Posts one text message to the chat channel
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn post(&self, text: &str) -> Result<()>;
}

/// Slack incoming-webhook notifier
pub struct SlackWebhook {
    http_client: reqwest::Client,
    url: String,
}

impl SlackWebhook {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http_client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Notifier for SlackWebhook {
    async fn post(&self, text: &str) -> Result<()> {
        let response = self
            .http_client
            .post(&self.url)
            .json(&json!({ "text": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Notify {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Writes messages to the log instead of a channel
///
/// Used when no webhook is configured or notifications are switched off.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn post(&self, text: &str) -> Result<()> {
        tracing::info!(message = %text, "Notification (not delivered)");
        Ok(())
    }
}

/// Post every message in order; failures are logged and skipped
///
/// Returns how many messages were accepted.
pub async fn post_all(notifier: &dyn Notifier, messages: &[String]) -> usize {
    let mut delivered = 0;
    for message in messages {
        match notifier.post(message).await {
            Ok(()) => delivered += 1,
            Err(e) => tracing::warn!("Failed to post notification: {}", e),
        }
    }
    delivered
}
