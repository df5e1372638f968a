//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for sending requests through the full axum router, and
//! `MockServices`, a local stand-in for the GitHub API and the Slack webhook.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{self, Method, Request, Response, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use gh_slack_relay::api::{create_router, AppState};
use gh_slack_relay::config::Config;
use gh_slack_relay::webhooks::Relay;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tower::ServiceExt;

// ============================================================================
// Mock GitHub + Slack
// ============================================================================

#[derive(Clone, Default)]
struct MockState {
    members: Arc<HashSet<String>>,
    lookups: Arc<Mutex<Vec<String>>>,
    messages: Arc<Mutex<Vec<Value>>>,
}

/// Local server answering membership lookups and collecting Slack posts.
pub struct MockServices {
    pub url: String,
    state: MockState,
    _handle: JoinHandle<()>,
}

impl MockServices {
    /// Start the mock with the given org members.
    pub async fn start(members: &[&str]) -> Self {
        let state = MockState {
            members: Arc::new(members.iter().map(|m| (*m).to_string()).collect()),
            ..MockState::default()
        };

        let router = Router::new()
            .route("/orgs/{org}/members/{user}", get(membership))
            .route("/slack", post(slack))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock services");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Mock services failed");
        });

        Self {
            url: format!("http://{addr}"),
            state,
            _handle: handle,
        }
    }

    /// Config pointing both outbound calls at this mock.
    pub fn config(&self) -> Config {
        Config {
            github_api_url: self.url.clone(),
            slack_webhook_url: format!("{}/slack", self.url),
            ..Config::default_for_test()
        }
    }

    /// Usernames looked up so far.
    pub fn lookups(&self) -> Vec<String> {
        self.state.lookups.lock().unwrap().clone()
    }

    /// Slack bodies received so far.
    pub fn messages(&self) -> Vec<Value> {
        self.state.messages.lock().unwrap().clone()
    }

    /// Wait until at least `count` Slack messages arrived, or give up after two seconds.
    pub async fn wait_for_messages(&self, count: usize) -> Vec<Value> {
        for _ in 0..100 {
            let messages = self.messages();
            if messages.len() >= count {
                return messages;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.messages()
    }
}

async fn membership(
    State(state): State<MockState>,
    Path((_org, user)): Path<(String, String)>,
) -> StatusCode {
    state.lookups.lock().unwrap().push(user.clone());
    if state.members.contains(&user) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn slack(State(state): State<MockState>, Json(body): Json<Value>) -> StatusCode {
    state.messages.lock().unwrap().push(body);
    StatusCode::OK
}

// ============================================================================
// TestApp
// ============================================================================

/// Full router wired to a given config.
pub struct TestApp {
    pub router: Router,
    pub relay: Relay,
}

impl TestApp {
    pub fn new(config: Config) -> Self {
        let relay = Relay::new(&config).expect("Failed to build relay");
        let router = create_router(AppState::new(config, relay.clone()));
        Self { router, relay }
    }

    /// Build a `POST /webhook` request with the given event header and body.
    pub fn webhook(event: Option<&str>, body: impl Into<Body>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/webhook")
            .header(http::header::CONTENT_TYPE, "application/json");
        if let Some(event) = event {
            builder = builder.header("X-GitHub-Event", event);
        }
        builder.body(body.into()).expect("Failed to build request")
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }
}

/// Read a response body to a string.
pub async fn body_to_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

// ============================================================================
// Payload builders
// ============================================================================

/// `issues` webhook body.
pub fn issue_payload(action: &str, user: &str, private: bool) -> Value {
    json!({
        "action": action,
        "issue": {
            "user": { "login": user, "html_url": format!("https://github.com/{user}") },
            "title": "Button <b>renders</b> twice",
            "html_url": "https://github.com/acme/widgets/issues/12",
            "created_at": Utc::now().to_rfc3339(),
        },
        "repository": {
            "name": "widgets",
            "full_name": "acme/widgets",
            "html_url": "https://github.com/acme/widgets",
            "private": private,
        },
        "sender": { "login": user },
    })
}

/// `pull_request` webhook body.
pub fn pull_request_payload(
    action: &str,
    user: &str,
    title: &str,
    merged: bool,
    created_at: DateTime<Utc>,
) -> Value {
    json!({
        "action": action,
        "number": 42,
        "pull_request": {
            "user": { "login": user, "html_url": format!("https://github.com/{user}") },
            "title": title,
            "html_url": "https://github.com/acme/widgets/pull/42",
            "created_at": created_at.to_rfc3339(),
            "merged": merged,
        },
        "repository": {
            "name": "widgets",
            "full_name": "acme/widgets",
            "html_url": "https://github.com/acme/widgets",
            "private": false,
        },
    })
}

/// Serialize a JSON value into a request body.
pub fn to_body(value: &Value) -> Body {
    Body::from(serde_json::to_vec(value).expect("Failed to serialize payload"))
}
