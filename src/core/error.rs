//! Error types and error handling for the Unsplash MCP service.
//!
//! This module defines the error taxonomy used throughout the
//! application. Protocol-specific error handling (JSON-RPC error
//! codes) is handled in the respective adapter modules.

use thiserror::Error as ThisError;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service
#[derive(ThisError, Debug)]
pub enum Error {
    /// Bad or missing arguments; never reaches the upstream API
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Upstream rejected the access key (HTTP 401)
    #[error("Invalid Unsplash API key. Please check your UNSPLASH_ACCESS_KEY environment variable.")]
    InvalidCredentials,

    /// Upstream rate limit hit (HTTP 403)
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Any other upstream non-2xx, or a 2xx body that fails to decode
    #[error("Unsplash API error: {status} - {message}")]
    Upstream { status: u16, message: String },

    /// Network-level failure reaching the upstream API
    #[error("Failed to search images: {0}")]
    Transport(String),

    /// Configuration problem (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error was produced before any upstream call
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if the caller can recover by retrying later
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RateLimited | Error::Transport(_))
    }
}
