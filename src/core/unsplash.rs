//! Unsplash search client.
//!
//! Issues the single outbound call of the service: GET
//! `/search/photos` against the Unsplash API. The upstream payload is
//! deserialized into strict private types at this boundary; a photo
//! record missing a required field fails the whole call instead of
//! surfacing a partial result.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::error::{Error, Result};
use crate::core::types::{ImageResult, ImageUrls, Photographer, SearchRequest, SearchResponse};

/// Unsplash API version header value
const ACCEPT_VERSION: &str = "v1";

/// Placeholder when a photo has neither description nor alt text
const NO_DESCRIPTION: &str = "No description";

/// Client for the Unsplash photo search API
///
/// Holds the shared HTTP client, the API base URL, and the static
/// access key sourced from configuration at startup. No retries and
/// no caching; every failure surfaces immediately.
pub struct UnsplashClient {
    http: Client,
    api_base: String,
    access_key: String,
}

/// Outbound query string, built after per_page clamping
#[derive(Debug, Serialize)]
struct SearchParams<'a> {
    query: &'a str,
    page: u32,
    per_page: u32,
}

/// Upstream search payload (strict: required fields fail closed)
#[derive(Debug, Deserialize)]
struct SearchPayload {
    total: u64,
    total_pages: u64,
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    alt_description: Option<String>,
    urls: PhotoUrls,
    user: PhotoUser,
    links: PhotoLinks,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    small: String,
    regular: String,
    full: String,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    name: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct PhotoLinks {
    html: String,
}

/// Unsplash error body shape: `{"errors": ["..."]}`
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    errors: Vec<String>,
}

impl UnsplashClient {
    /// Create a client for the given API base and access key
    pub fn new(api_base: impl Into<String>, access_key: impl Into<String>) -> Self {
        let http = Client::builder()
            .user_agent(concat!("unsplash-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            api_base: api_base.into(),
            access_key: access_key.into(),
        }
    }

    /// Search photos matching the request
    ///
    /// # Arguments
    ///
    /// * `request` - Validated query with optional paging
    ///
    /// # Returns
    ///
    /// Reshaped search response preserving upstream result order
    ///
    /// # Errors
    ///
    /// - `Validation`: empty query or zero page (no outbound call made)
    /// - `InvalidCredentials`: upstream returned 401
    /// - `RateLimited`: upstream returned 403
    /// - `Upstream`: any other non-2xx, or an undecodable 2xx body
    /// - `Transport`: network-level failure
    pub async fn search_photos(&self, request: SearchRequest) -> Result<SearchResponse> {
        request.validate()?;

        let page = request.page();
        let per_page = request.per_page();
        let url = format!("{}/search/photos", self.api_base);

        debug!(query = %request.query, page, per_page, "Searching Unsplash");

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Accept-Version", ACCEPT_VERSION)
            .query(&SearchParams {
                query: &request.query,
                page,
                per_page,
            })
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let err = classify_failure(status, response).await;
            warn!(status = status.as_u16(), error = %err, "Unsplash request failed");
            return Err(err);
        }

        let payload: SearchPayload = response.json().await.map_err(|_| Error::Upstream {
            status: status.as_u16(),
            message: "unexpected response body".to_string(),
        })?;

        debug!(
            total = payload.total,
            returned = payload.results.len(),
            "Unsplash search completed"
        );

        Ok(reshape(request.query, page, payload))
    }
}

/// Map a non-2xx upstream response onto the error taxonomy
async fn classify_failure(status: StatusCode, response: reqwest::Response) -> Error {
    match status {
        StatusCode::UNAUTHORIZED => Error::InvalidCredentials,
        StatusCode::FORBIDDEN => Error::RateLimited,
        _ => Error::Upstream {
            status: status.as_u16(),
            message: upstream_message(status, response).await,
        },
    }
}

/// Best-effort message for an upstream failure
///
/// Unsplash reports errors as `{"errors": [...]}`; when the body does
/// not parse, the status line's canonical reason is used instead.
async fn upstream_message(status: StatusCode, response: reqwest::Response) -> String {
    if let Ok(payload) = response.json::<ErrorPayload>().await {
        if !payload.errors.is_empty() {
            return payload.errors.join("; ");
        }
    }

    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

/// Reduce the upstream payload to the outward result shape
fn reshape(query: String, page: u32, payload: SearchPayload) -> SearchResponse {
    let results = payload
        .results
        .into_iter()
        .map(|photo| ImageResult {
            id: photo.id,
            description: photo
                .description
                .or(photo.alt_description)
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            urls: ImageUrls {
                small: photo.urls.small,
                regular: photo.urls.regular,
                full: photo.urls.full,
            },
            photographer: Photographer {
                name: photo.user.name,
                username: photo.user.username,
            },
            link: photo.links.html,
        })
        .collect();

    SearchResponse {
        query,
        total: payload.total,
        total_pages: payload.total_pages,
        page,
        results,
    }
}
