//! GitHub to Slack Relay - Main Entry Point
//!
//! Listens for GitHub webhooks and posts issue and pull request activity to Slack.

use anyhow::{Context, Result};
use tracing::info;

use gh_slack_relay::{api, config, webhooks::Relay};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gh_slack_relay=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        org = %config.github_org,
        debug = config.debug,
        "Starting GitHub to Slack relay"
    );
    if config.debug {
        info!("Debug mode enabled: private repositories, bots and org members are not excluded");
    }

    let relay = Relay::new(&config).context("Failed to build HTTP client")?;
    let bind_address = config.bind_address();

    // Build router
    let app = api::create_router(api::AppState::new(config, relay));

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    info!(address = %bind_address, "Server is running");

    // Graceful shutdown handler
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
