//! GitHub Event Types
//!
//! Payload shapes for the `issues` and `pull_request` webhooks and the
//! normalized event the relay works with.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::types::RelayError;

/// Webhook event kinds the relay handles, keyed by `X-GitHub-Event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Issue,
    PullRequest,
}

impl EventKind {
    /// Parse an `X-GitHub-Event` header value.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "issues" => Some(Self::Issue),
            "pull_request" => Some(Self::PullRequest),
            _ => None,
        }
    }

    /// The header value this kind was parsed from.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Issue => "issues",
            Self::PullRequest => "pull_request",
        }
    }

    /// Payload key holding the issue or pull request object.
    pub const fn payload_key(&self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::PullRequest => "pull_request",
        }
    }

    /// Noun used in notification text.
    pub const fn noun(&self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::PullRequest => "PR",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.payload_key())
    }
}

/// GitHub account reference.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub html_url: String,
}

/// Repository the event happened in.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub html_url: String,
    pub private: bool,
}

/// Issue or pull request object. Issues carry no `merged` field.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueOrPullRequest {
    pub user: GitHubUser,
    pub title: String,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub merged: bool,
}

/// Top-level body of an `issues` or `pull_request` webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    pub action: String,
    pub repository: Repository,
    #[serde(default)]
    pub issue: Option<IssueOrPullRequest>,
    #[serde(default)]
    pub pull_request: Option<IssueOrPullRequest>,
}

/// Normalized event, built once per webhook call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub kind: EventKind,
    pub action: String,
    pub actor_username: String,
    pub actor_profile_url: String,
    pub title: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub repository_name: String,
    pub repository_full_name: Option<String>,
    pub repository_url: String,
    pub repository_is_private: bool,
    /// Always false for issues.
    pub merged: bool,
}

impl InboundEvent {
    /// Parse a raw webhook body for the given event kind.
    pub fn from_slice(kind: EventKind, body: &[u8]) -> Result<Self, RelayError> {
        let payload: WebhookPayload = serde_json::from_slice(body)?;
        Self::from_payload(kind, payload)
    }

    /// Pick the issue or pull request object out of a payload.
    pub fn from_payload(kind: EventKind, payload: WebhookPayload) -> Result<Self, RelayError> {
        let item = match kind {
            EventKind::Issue => payload.issue,
            EventKind::PullRequest => payload.pull_request,
        }
        .ok_or(RelayError::MissingItem(kind))?;

        Ok(Self {
            kind,
            action: payload.action,
            actor_username: item.user.login,
            actor_profile_url: item.user.html_url,
            title: item.title,
            target_url: item.html_url,
            created_at: item.created_at,
            repository_name: payload.repository.name,
            repository_full_name: payload.repository.full_name,
            repository_url: payload.repository.html_url,
            repository_is_private: payload.repository.private,
            merged: kind == EventKind::PullRequest && item.merged,
        })
    }

    /// `owner/name` when present, otherwise the bare repository name.
    pub fn repository_label(&self) -> &str {
        self.repository_full_name
            .as_deref()
            .unwrap_or(&self.repository_name)
    }
}
