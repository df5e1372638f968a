//! Webhook HTTP Handler
//!
//! `POST /webhook` always answers `202 Accepted`; the event is processed after
//! the response is decided and its outcome is never reported back.

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;

use crate::api::AppState;

/// Header carrying the GitHub event name.
pub const GITHUB_EVENT_HEADER: &str = "x-github-event";

/// GitHub caps webhook payloads at 25 MB.
const MAX_PAYLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Webhook routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/webhook", post(receive_github_webhook))
        .layer(DefaultBodyLimit::max(MAX_PAYLOAD_BYTES))
}

/// Accept a GitHub webhook.
///
/// The body is taken as raw bytes so a malformed payload is still acknowledged.
pub async fn receive_github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let event = headers
        .get(GITHUB_EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    state.relay.spawn(event, body);

    (StatusCode::ACCEPTED, "Accepted")
}
