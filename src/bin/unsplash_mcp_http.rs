//! Unsplash MCP server, Streamable HTTP transport
//!
//! Starts the HTTP adapter: the `/mcp` protocol endpoint with session
//! and SSE support, plus `/health` and `/`.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use unsplash_mcp::core::config::Config;
use unsplash_mcp::core::services::Services;
use unsplash_mcp::http::{self, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unsplash_mcp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Unsplash MCP service");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // A local .env may carry UNSPLASH_ACCESS_KEY during development
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()?;

    // Log configuration details
    config.log_config();

    // Create shared services and adapter state
    let services = Arc::new(Services::new(config.clone()));
    let state = AppState::new(services);

    // Build the router
    let app = http::router(state);

    // Bind to address and start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("MCP endpoint at http://{}/mcp", addr);
    tracing::info!("Service ready - Health check at http://{}/health", addr);

    // Serve the application
    axum::serve(listener, app).await?;

    Ok(())
}
