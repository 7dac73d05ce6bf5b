//! Todayd - Today's Tasks Proxy Server
//!
//! Binds the configured port and serves today's task names from the
//! configured Asana task list.

use std::sync::Arc;
use todayd::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional .env file; silently ignored if absent.
    dotenvy::dotenv().ok();

    // Missing PORT is the one fatal startup condition: exit before any
    // listener is bound.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    if config.upstream.access_token.is_empty() {
        tracing::warn!("TONY_ACCESS_TOKEN not set, upstream will reject every request");
    }

    tracing::info!("Starting Todayd...");
    tracing::info!("Try: curl http://localhost:{}/", config.port);
    tracing::info!("Health check: curl http://localhost:{}/_health", config.port);

    let source = Arc::new(AsanaClient::new(config.upstream.clone())?);
    let handler = TodayHandler::new(source);

    // Run the server
    Server::new(config, handler).run().await
}
