//! MCP Streamable HTTP adapter
//!
//! Envelope translation only: session and SSE mechanics live here,
//! protocol semantics live in `crate::mcp`. Serves the single `/mcp`
//! path plus the `/health` and `/` service routes.

use axum::http::{header, HeaderName, Method};
use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

pub mod handlers;
pub mod middleware;
pub mod session;
pub mod state;

pub use handlers::*;
pub use session::SessionStore;
pub use state::AppState;

/// Build the HTTP router with logging and CORS layers applied
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route(
            handlers::MCP_PATH,
            post(handlers::mcp_post)
                .get(handlers::mcp_get)
                .delete(handlers::mcp_delete),
        )
        .layer(axum::middleware::from_fn(middleware::log_request))
        .layer(cors_layer())
        .with_state(state)
}

/// Fixed CORS allow-list for browser-based MCP clients
///
/// The session id header must be both accepted and exposed so a
/// browser client can read it off the initialize response.
fn cors_layer() -> CorsLayer {
    let session_header = HeaderName::from_static(handlers::MCP_SESSION_ID);

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, session_header.clone()])
        .expose_headers([session_header])
        .max_age(Duration::from_secs(86400))
}
