//! MCP-specific error types

use thiserror::Error;

use crate::mcp::protocol::{
    INTERNAL_ERROR, INVALID_CREDENTIALS, INVALID_PARAMS, INVALID_REQUEST, PARSE_ERROR,
    RATE_LIMITED, UPSTREAM_ERROR, UPSTREAM_UNREACHABLE,
};

#[derive(Debug, Error)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Tool error (code {0}): {1}")]
    ToolError(i32, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// JSON-RPC error code for this error
    pub fn code(&self) -> i32 {
        match self {
            McpError::ParseError(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::InternalError(_) => INTERNAL_ERROR,
            McpError::ToolError(code, _) => *code,
            McpError::Io(_) | McpError::Json(_) => INTERNAL_ERROR,
        }
    }

    /// Error message without the variant prefix
    pub fn message(&self) -> String {
        match self {
            McpError::ParseError(msg)
            | McpError::InvalidRequest(msg)
            | McpError::InvalidParams(msg)
            | McpError::InternalError(msg) => msg.clone(),
            McpError::ToolError(_, msg) => msg.clone(),
            McpError::Io(e) => format!("I/O error: {e}"),
            McpError::Json(e) => format!("JSON error: {e}"),
        }
    }
}

impl From<crate::core::error::Error> for McpError {
    fn from(err: crate::core::error::Error) -> Self {
        use crate::core::error::Error;

        let message = err.to_string();
        match err {
            Error::Validation(msg) => McpError::InvalidParams(msg),
            Error::InvalidCredentials => McpError::ToolError(INVALID_CREDENTIALS, message),
            Error::RateLimited => McpError::ToolError(RATE_LIMITED, message),
            Error::Upstream { .. } => McpError::ToolError(UPSTREAM_ERROR, message),
            Error::Transport(_) => McpError::ToolError(UPSTREAM_UNREACHABLE, message),
            Error::Config(msg) => McpError::InternalError(msg),
            Error::Toml(_) => McpError::InternalError(message),
        }
    }
}
