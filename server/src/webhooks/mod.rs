//! GitHub Webhook Relay
//!
//! Receives `issues` and `pull_request` webhooks, drops the ones that should
//! not be announced, and forwards the rest to Slack.

pub mod dispatch;
pub mod events;
pub mod filter;
pub mod format;
pub mod handlers;
pub mod types;

pub use dispatch::Relay;
