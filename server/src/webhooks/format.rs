//! Slack Message Formatting
//!
//! Turns an [`InboundEvent`] into Slack `mrkdwn` text. Only `opened`,
//! `reopened` and `closed` actions produce a message.

use chrono::{DateTime, Utc};

use super::events::{EventKind, InboundEvent};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Build the notification text for an event, or `None` if the action is not announced.
pub fn format_message(event: &InboundEvent, now: DateTime<Utc>) -> Option<String> {
    match event.action.as_str() {
        "opened" | "reopened" => Some(format_open_reopen(event)),
        "closed" => Some(format_closed(event, now)),
        _ => None,
    }
}

fn format_open_reopen(event: &InboundEvent) -> String {
    let noun = event.kind.noun();
    format!(
        "🔔 *<{user_url}|{user}> {action} {article} {noun}:*\n\
         Title: <{item_url}|{title}>\n\
         Repo: <{repo_url}|{repo}>",
        user_url = event.actor_profile_url,
        user = event.actor_username,
        action = event.action,
        article = article_for(noun),
        item_url = event.target_url,
        title = escape_html(&event.title),
        repo_url = event.repository_url,
        repo = event.repository_name,
    )
}

fn format_closed(event: &InboundEvent, now: DateTime<Utc>) -> String {
    let (emoji, verb) = match (event.kind, event.merged) {
        (EventKind::PullRequest, true) => ("🎉", "merged"),
        (EventKind::PullRequest, false) => ("😢", "not merged"),
        (EventKind::Issue, _) => ("🎉", "closed"),
    };
    format!(
        "{emoji} *<{user_url}|{user}>'s {noun} was {verb}:*\n\
         Open: {days} days\n\
         Title: <{item_url}|{title}>\n\
         Repo: <{repo_url}|{repo}>",
        user_url = event.actor_profile_url,
        user = event.actor_username,
        noun = event.kind.noun(),
        days = days_open(event.created_at, now),
        item_url = event.target_url,
        title = escape_html(&event.title),
        repo_url = event.repository_url,
        repo = event.repository_name,
    )
}

/// Whole days between `created_at` and `now`, rounded half away from zero.
pub fn days_open(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (now - created_at).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).round() as i64
}

/// "an" before a vowel, "a" otherwise.
pub fn article_for(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Escape the characters Slack treats as control sequences.
///
/// `&` is handled first so the entities produced for `<` and `>` are not escaped again.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
