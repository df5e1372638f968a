//! GitHub to Slack Relay
//!
//! Forwards GitHub issue and pull request activity to a Slack channel,
//! skipping private repositories, bots and members of the configured
//! organization.

pub mod api;
pub mod config;
pub mod github;
pub mod slack;
pub mod webhooks;
