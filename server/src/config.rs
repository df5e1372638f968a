//! Relay Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Bot accounts excluded when `EXCLUDED_BOTS` is not set.
pub const DEFAULT_EXCLUDED_BOTS: &[&str] = &["dependabot[bot]"];

/// Relay configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen host (default: "0.0.0.0")
    pub bind_host: String,

    /// Listen port (default: 3000)
    pub port: u16,

    /// Slack incoming webhook URL
    pub slack_webhook_url: String,

    /// GitHub bearer token used for organization membership lookups
    pub github_token: String,

    /// GitHub REST API base URL (default: `https://api.github.com`)
    pub github_api_url: String,

    /// Organization whose members are not announced
    pub github_org: String,

    /// Logins that never produce a notification
    pub excluded_bots: Vec<String>,

    /// Bypass all exclusions and log every event that passes
    pub debug: bool,

    /// Treat a failed membership lookup as "not a member" (default: false)
    pub membership_fail_open: bool,

    /// Timeout applied to outbound GitHub and Slack calls (default: 10s)
    pub outbound_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_host: env::var("BIND_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .ok()
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("PORT must be a valid port number")?
                .unwrap_or(3000),
            slack_webhook_url: env::var("SLACK_WEBHOOK_URL")
                .context("SLACK_WEBHOOK_URL must be set")?,
            github_token: env::var("GITHUB_TOKEN").context("GITHUB_TOKEN must be set")?,
            github_api_url: env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".into()),
            github_org: env::var("GITHUB_ORG").unwrap_or_else(|_| "vaadin".into()),
            excluded_bots: env::var("EXCLUDED_BOTS")
                .ok()
                .map(|s| parse_list(&s))
                .unwrap_or_else(default_excluded_bots),
            debug: env_flag("DEBUG"),
            membership_fail_open: env_flag("MEMBERSHIP_FAIL_OPEN"),
            outbound_timeout: Duration::from_secs(
                env::var("OUTBOUND_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
        })
    }

    /// Socket address string the listener binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }

    /// Create a default configuration for testing.
    ///
    /// Points both outbound services at a closed local port; tests that
    /// exercise delivery override the URLs with their mock servers.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_host: "127.0.0.1".into(),
            port: 3000,
            slack_webhook_url: "http://127.0.0.1:9/slack".into(),
            github_token: "test-token".into(),
            github_api_url: "http://127.0.0.1:9".into(),
            github_org: "vaadin".into(),
            excluded_bots: default_excluded_bots(),
            debug: false,
            membership_fail_open: false,
            outbound_timeout: Duration::from_secs(2),
        }
    }
}

fn default_excluded_bots() -> Vec<String> {
    DEFAULT_EXCLUDED_BOTS.iter().map(|s| (*s).to_string()).collect()
}

fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// A flag is on only when set to `true` (any case).
fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|v| v.trim().eq_ignore_ascii_case("true"))
}
