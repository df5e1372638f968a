//! GitHub API Access
//!
//! Outbound calls to the GitHub REST API.

pub mod membership;

pub use membership::MembershipChecker;
