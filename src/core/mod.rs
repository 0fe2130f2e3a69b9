//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of transport protocols (HTTP, MCP, etc).
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **unsplash**: Upstream search client
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod services;
pub mod types;
pub mod unsplash;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use services::Services;
pub use unsplash::UnsplashClient;
