//! Webhook Event Dispatch
//!
//! Runs one GitHub webhook through parse → filter → format → notify. The HTTP
//! handler acknowledges first and hands the body to [`Relay::spawn`].

use axum::body::Bytes;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::events::{EventKind, InboundEvent};
use super::filter::ExclusionFilter;
use super::format::format_message;
use super::types::{Outcome, RelayError};
use crate::config::Config;
use crate::github::MembershipChecker;
use crate::slack::SlackNotifier;

/// Maximum number of payload characters included in parse-failure logs.
const PAYLOAD_PREVIEW_CHARS: usize = 500;

/// The filter/format/notify pipeline. Cheap to clone; holds no mutable state.
#[derive(Debug, Clone)]
pub struct Relay {
    filter: ExclusionFilter,
    notifier: SlackNotifier,
}

impl Relay {
    /// Build the pipeline with one shared HTTP client for GitHub and Slack.
    pub fn new(config: &Config) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder()
            .timeout(config.outbound_timeout)
            .build()?;

        let membership = MembershipChecker::new(http.clone(), config);
        Ok(Self::from_parts(
            ExclusionFilter::new(membership, config),
            SlackNotifier::new(http, config),
        ))
    }

    pub const fn from_parts(filter: ExclusionFilter, notifier: SlackNotifier) -> Self {
        Self { filter, notifier }
    }

    /// Process a webhook in a detached task. Errors and panics are logged only.
    pub fn spawn(&self, event_header: Option<String>, body: Bytes) {
        let relay = self.clone();
        tokio::spawn(async move {
            let event_name = event_header.clone().unwrap_or_default();
            let handle = tokio::spawn(async move {
                relay.handle(event_header.as_deref(), &body).await;
            });
            if let Err(e) = handle.await {
                error!(event = %event_name, "Webhook task panicked: {}", e);
            }
        });
    }

    /// [`Relay::process`] with failures logged instead of returned.
    pub async fn handle(&self, event_header: Option<&str>, body: &[u8]) {
        match self.process(event_header, body).await {
            Ok(outcome) => debug!(event = ?event_header, ?outcome, "Webhook processed"),
            Err(e) => {
                let preview: String = String::from_utf8_lossy(body)
                    .chars()
                    .take(PAYLOAD_PREVIEW_CHARS)
                    .collect();
                warn!(
                    event = ?event_header,
                    error = %e,
                    payload_preview = %preview,
                    "Failed to process webhook"
                );
            }
        }
    }

    /// Run the pipeline and report what happened.
    pub async fn process(
        &self,
        event_header: Option<&str>,
        body: &[u8],
    ) -> Result<Outcome, RelayError> {
        let Some(kind) = event_header.and_then(EventKind::parse_str) else {
            return Ok(Outcome::Ignored);
        };

        let event = InboundEvent::from_slice(kind, body)?;
        info!(
            "Received {} event from {} on {}",
            kind.as_str(),
            event.actor_username,
            event.repository_label()
        );

        if let Some(reason) = self.filter.check(&event).await {
            info!(
                user = %event.actor_username,
                repo = %event.repository_label(),
                %reason,
                "Event excluded"
            );
            return Ok(Outcome::Excluded(reason));
        }
        info!(
            "Not excluded: {} on {}",
            event.actor_username,
            event.repository_label()
        );

        match format_message(&event, Utc::now()) {
            Some(message) => {
                self.notifier.send_detached(message);
                Ok(Outcome::Notified)
            }
            None => {
                debug!(action = %event.action, "No message for action");
                Ok(Outcome::NoMessage)
            }
        }
    }
}
