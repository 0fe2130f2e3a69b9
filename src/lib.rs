//! Unsplash MCP - Image Search over the Model Context Protocol
//!
//! Exposes the Unsplash photo search API as a single MCP tool,
//! reachable over stdio (for locally spawned servers) or streamable
//! HTTP with session management and SSE.
//!
//! # Architecture
//!
//! The codebase is organized into three main modules:
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types
//!   - unsplash (upstream search client)
//!   - services (unified service container)
//!
//! - **mcp**: Protocol layer (depends on core)
//!   - protocol (JSON-RPC envelopes and MCP result types)
//!   - handlers (method dispatch shared by every transport)
//!   - tools (registry + search_images handler)
//!   - server, transport (stdio adapter)
//!
//! - **http**: Streamable HTTP adapter (depends on core and mcp)
//!   - handlers, session, middleware
//!
//! # Key Features
//!
//! - One tool: `search_images` (query, page, per_page)
//! - Strictly typed upstream boundary (no dynamic JSON reshaping)
//! - Session-scoped SSE streams with explicit lifecycle
//! - Uniform error contract (protocol-level JSON-RPC errors)

// Core domain logic (protocol-agnostic)
pub mod core;

// Streamable HTTP adapter
pub mod http;

// MCP (Model Context Protocol) layer
pub mod mcp;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{Error, Result};
pub use core::services::Services;
pub use core::types::*;
