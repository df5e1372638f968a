//! Relay Types
//!
//! Pipeline outcomes and the error type shared by the relay components.

use thiserror::Error;

use super::events::EventKind;

/// Why an event was not announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    /// The repository is private.
    PrivateRepository,
    /// The actor is a known bot account.
    ExcludedBot,
    /// The actor belongs to the configured organization.
    OrgMember,
}

impl ExclusionReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PrivateRepository => "private_repository",
            Self::ExcludedBot => "excluded_bot",
            Self::OrgMember => "org_member",
        }
    }
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running one webhook through the pipeline.
///
/// Never reported to the webhook sender; used for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The `X-GitHub-Event` value is not one the relay handles.
    Ignored,
    /// An exclusion rule matched.
    Excluded(ExclusionReason),
    /// The action has no message template.
    NoMessage,
    /// A message was handed to the notifier.
    Notified,
}

/// Relay errors.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid webhook payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("Payload has no `{0}` object")]
    MissingItem(EventKind),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Slack responded with HTTP {0}")]
    SlackStatus(u16),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
