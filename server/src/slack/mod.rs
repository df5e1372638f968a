//! Slack Notifier
//!
//! Best-effort delivery of `mrkdwn` messages to a Slack incoming webhook.
//! Failures are logged and dropped; nothing is retried.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::webhooks::types::RelayError;

/// Body accepted by Slack incoming webhooks.
#[derive(Debug, Serialize)]
struct SlackMessage<'a> {
    text: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Posts messages to the configured Slack webhook.
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    http: reqwest::Client,
    webhook_url: String,
}

impl SlackNotifier {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            webhook_url: config.slack_webhook_url.clone(),
        }
    }

    /// Send a message, logging and discarding any failure.
    pub async fn send(&self, text: &str) {
        if let Err(e) = self.try_send(text).await {
            warn!(error = %e, "Error posting message to Slack");
        }
    }

    /// Send a message in a detached task; the caller does not wait for delivery.
    pub fn send_detached(&self, text: String) {
        let notifier = self.clone();
        tokio::spawn(async move {
            notifier.send(&text).await;
        });
    }

    /// Send a message and report the outcome.
    pub async fn try_send(&self, text: &str) -> Result<(), RelayError> {
        let response = self
            .http
            .post(&self.webhook_url)
            .json(&SlackMessage {
                text,
                kind: "mrkdwn",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::SlackStatus(status.as_u16()));
        }
        debug!(status = status.as_u16(), "Slack message delivered");
        Ok(())
    }
}
