//! Core data types for the Unsplash MCP service.
//!
//! This module defines the data structures shared by every
//! transport: search requests, reshaped image results, and the
//! health/info responses of the HTTP adapter.

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// First page of upstream results
pub const DEFAULT_PAGE: u32 = 1;

/// Results per page when the caller does not specify one
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Upstream hard limit on results per page
pub const MAX_PER_PAGE: u32 = 30;

/// Request to search images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Search query string
    pub query: String,

    /// Page number, 1-based (optional)
    #[serde(default)]
    pub page: Option<u32>,

    /// Results per page, 1..=30 (optional)
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl SearchRequest {
    /// Create a request with default paging
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: None,
            per_page: None,
        }
    }

    /// Effective page number (defaults to 1)
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    /// Effective page size, clamped to [1, 30]
    ///
    /// Values above 30 are silently reduced rather than rejected;
    /// the upstream API caps per_page at 30.
    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    /// Validate the request before it reaches the upstream client
    ///
    /// # Errors
    ///
    /// - `Validation`: query is empty after trimming, or page is 0
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(Error::Validation("query cannot be empty".to_string()));
        }

        if self.page == Some(0) {
            return Err(Error::Validation("page must be at least 1".to_string()));
        }

        Ok(())
    }
}

/// Reduced set of image URLs surfaced to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrls {
    /// Thumbnail-sized rendition
    pub small: String,

    /// Medium rendition suitable for display
    pub regular: String,

    /// Full-resolution rendition
    pub full: String,
}

/// Attribution for the photo's author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photographer {
    /// Display name
    pub name: String,

    /// Unsplash username
    pub username: String,
}

/// One reshaped photo record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Upstream photo identifier
    pub id: String,

    /// Description, falling back to alt text, then a placeholder
    pub description: String,

    /// Reduced URL set
    pub urls: ImageUrls,

    /// Author attribution
    pub photographer: Photographer,

    /// Photo page on unsplash.com
    pub link: String,
}

/// Response from a search operation
///
/// `results` preserves upstream ordering. Zero upstream hits
/// serialize as `results: []` with `total: 0`; there is no
/// special-cased empty message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Original query string
    pub query: String,

    /// Total matching photos upstream
    pub total: u64,

    /// Total pages at the effective page size
    pub total_pages: u64,

    /// Page this response covers (echoes the request)
    pub page: u32,

    /// Reshaped photo records
    pub results: Vec<ImageResult>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Service version
    pub version: String,

    /// Count of live MCP sessions
    pub active_sessions: usize,
}

/// Endpoint listing for the root route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointInfo {
    /// MCP protocol path
    pub mcp: String,

    /// Health check path
    pub health: String,
}

/// Service info served at the root route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service name
    pub service: String,

    /// Service version
    pub version: String,

    /// Available endpoints
    pub endpoints: EndpointInfo,
}
