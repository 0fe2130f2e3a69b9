//! Application state for the HTTP adapter
//!
//! Shared across all request handlers: the transport-agnostic
//! protocol dispatcher plus the session registry owned by this
//! adapter.

use std::sync::Arc;

use crate::core::services::Services;
use crate::http::session::SessionStore;
use crate::mcp::handlers::ProtocolHandlers;

/// Shared application state for Axum handlers
#[derive(Clone)]
pub struct AppState {
    /// MCP method dispatcher, shared with the stdio transport
    pub handlers: Arc<ProtocolHandlers>,

    /// Live session registry
    pub sessions: SessionStore,
}

impl AppState {
    /// Create a new AppState from the shared services
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            handlers: Arc::new(ProtocolHandlers::new(services)),
            sessions: SessionStore::new(),
        }
    }
}
