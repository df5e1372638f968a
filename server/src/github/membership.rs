//! Organization Membership Lookup
//!
//! Asks the GitHub REST API whether a login belongs to an organization.
//! GitHub answers `204 No Content` for members and `404` otherwise.

use reqwest::{header, StatusCode, Url};
use tracing::debug;

use crate::config::Config;
use crate::webhooks::types::RelayError;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("gh-slack-relay/", env!("CARGO_PKG_VERSION"));

/// Checks organization membership through `GET /orgs/{org}/members/{username}`.
#[derive(Debug, Clone)]
pub struct MembershipChecker {
    http: reqwest::Client,
    api_url: String,
    org: String,
    token: String,
}

impl MembershipChecker {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_url: config.github_api_url.clone(),
            org: config.github_org.clone(),
            token: config.github_token.clone(),
        }
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    /// Returns `Ok(true)` only when GitHub answers 204.
    ///
    /// Any other status is "not a member"; transport errors are returned so
    /// the caller can apply its failure policy.
    pub async fn is_member(&self, username: &str) -> Result<bool, RelayError> {
        let url = self.member_url(username)?;

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        debug!(username, org = %self.org, status = status.as_u16(), "Membership lookup");
        Ok(status == StatusCode::NO_CONTENT)
    }

    fn member_url(&self, username: &str) -> Result<Url, RelayError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| RelayError::InvalidUrl(format!("{}: {e}", self.api_url)))?;
        url.path_segments_mut()
            .map_err(|()| RelayError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .extend(["orgs", self.org.as_str(), "members", username]);
        Ok(url)
    }
}
