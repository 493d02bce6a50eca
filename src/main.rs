use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the VIRA application
///
/// Loads `.env`, resolves the classifier configuration once, then serves the REST API
/// (port 3000 by default).
///
/// # Environment Variables
/// - `VIRA_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `VIRA_TAXONOMY_FILE`: Taxonomy YAML overriding the built-in table (optional)
/// - `VIRA_MAX_INPUT_CHARS`: Cap on analysed user text (default: 20000)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vira_run=info".parse()?)
                .add_directive("vira_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("VIRA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    // A malformed taxonomy must stop startup, never surface per request.
    let cfg = match api_rest::config_from_env() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            tracing::error!("Invalid configuration: {:#}", e);
            return Err(e);
        }
    };
    tracing::info!("++ Loaded taxonomy with {} categories", cfg.taxonomy().len());

    api_rest::serve(&rest_addr, cfg).await
}
