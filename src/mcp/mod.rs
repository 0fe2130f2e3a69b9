//! MCP (Model Context Protocol) server module
//!
//! This module implements a JSON-RPC 2.0 compliant MCP server that
//! exposes Unsplash image search as an MCP tool. The protocol layer
//! is transport-agnostic: `ProtocolHandlers::dispatch` serves both
//! the stdio server here and the HTTP adapter in `crate::http`.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

// Re-export main types
pub use error::McpError;
pub use handlers::ProtocolHandlers;
pub use server::McpServer;
pub use tools::{McpToolHandler, ToolRegistry};
