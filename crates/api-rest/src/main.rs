//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging of the HTTP layer. The workspace's main `vira-run`
//! binary serves the same router and also loads `.env` files.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the VIRA REST API server
///
/// # Environment Variables
/// - `VIRA_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `VIRA_TAXONOMY_FILE`: Optional taxonomy YAML override
/// - `VIRA_MAX_INPUT_CHARS`: Cap on analysed user text
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the taxonomy or input cap is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("VIRA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let cfg = Arc::new(api_rest::config_from_env()?);

    api_rest::serve(&addr, cfg).await
}
