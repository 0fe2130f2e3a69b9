//! Unsplash MCP server, stdio transport
//!
//! A stdio-based MCP server that exposes Unsplash image search as a
//! tool for Claude Code and other MCP clients.

use std::sync::Arc;
use unsplash_mcp::core::config::Config;
use unsplash_mcp::core::services::Services;
use unsplash_mcp::mcp::McpServer;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr) // Critical: stderr not stdout
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false) // No color codes
        .compact() // Concise format
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    // A local .env may carry UNSPLASH_ACCESS_KEY during development
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        std::process::exit(1);
    });

    config.log_config();

    // Create services
    let services = Arc::new(Services::new(config));

    // Create and run MCP server
    let mut server = McpServer::new(services);

    if let Err(e) = server.run().await {
        eprintln!("MCP server error: {e}");
        std::process::exit(1);
    }
}
