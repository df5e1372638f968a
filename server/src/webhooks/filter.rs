//! Exclusion Rules
//!
//! Decides which events are not announced. Rules run in order and stop at the
//! first match, so the membership lookup only happens for public repositories
//! and non-bot actors.

use std::collections::HashSet;

use tracing::{info, warn};

use super::events::InboundEvent;
use super::types::ExclusionReason;
use crate::config::Config;
use crate::github::MembershipChecker;

#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    excluded_bots: HashSet<String>,
    membership: MembershipChecker,
    bypass: bool,
    fail_open: bool,
}

impl ExclusionFilter {
    pub fn new(membership: MembershipChecker, config: &Config) -> Self {
        Self {
            excluded_bots: config.excluded_bots.iter().cloned().collect(),
            membership,
            bypass: config.debug,
            fail_open: config.membership_fail_open,
        }
    }

    pub fn is_excluded_bot(&self, username: &str) -> bool {
        self.excluded_bots.contains(username)
    }

    /// Returns the first rule the event matches, or `None` if it should be announced.
    pub async fn check(&self, event: &InboundEvent) -> Option<ExclusionReason> {
        if self.bypass {
            info!(
                user = %event.actor_username,
                repo = %event.repository_label(),
                "Debug mode: exclusions bypassed"
            );
            return None;
        }

        if event.repository_is_private {
            return Some(ExclusionReason::PrivateRepository);
        }
        if self.is_excluded_bot(&event.actor_username) {
            return Some(ExclusionReason::ExcludedBot);
        }

        match self.membership.is_member(&event.actor_username).await {
            Ok(true) => Some(ExclusionReason::OrgMember),
            Ok(false) => None,
            Err(e) => {
                warn!(
                    user = %event.actor_username,
                    org = %self.membership.org(),
                    fail_open = self.fail_open,
                    error = %e,
                    "Membership lookup failed"
                );
                if self.fail_open {
                    None
                } else {
                    Some(ExclusionReason::OrgMember)
                }
            }
        }
    }
}
