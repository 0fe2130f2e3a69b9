//! HTTP request handlers for the MCP Streamable HTTP transport
//!
//! Implements the single `/mcp` path (POST, GET, DELETE) plus the
//! health and service-info routes. Protocol work is delegated to the
//! shared `ProtocolHandlers`; this layer only translates envelopes
//! and enforces the session rules of the transport.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::stream;
use std::convert::Infallible;

use crate::core::types::{EndpointInfo, HealthResponse, ServiceInfo};
use crate::http::session::StreamError;
use crate::http::state::AppState;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{
    JsonRpcRequest, JsonRpcResponse, INVALID_REQUEST, SESSION_NOT_FOUND, SESSION_REQUIRED,
};

/// Session id header of the MCP Streamable HTTP transport
pub const MCP_SESSION_ID: &str = "mcp-session-id";

/// MCP endpoint path
pub const MCP_PATH: &str = "/mcp";

const NO_SESSION_MESSAGE: &str = "Bad Request: No valid session ID provided";

/// MCP message handler
///
/// Accepts one JSON-RPC envelope per request. `initialize` without a
/// session header creates a session; every other request must carry
/// the `mcp-session-id` header of a live session.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `headers` - Request headers (session id, Accept)
/// * `body` - Raw JSON-RPC envelope
///
/// # Returns
///
/// The JSON-RPC response as `application/json`, or as a single-frame
/// SSE stream when the client accepts `text/event-stream`.
/// Notifications are acknowledged with 202 and an empty body.
pub async fn mcp_post(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let accepts_sse = accepts_event_stream(&headers);

    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            let err = McpError::ParseError(e.to_string());
            return protocol_error(StatusCode::BAD_REQUEST, err.code(), &err.message());
        }
    };

    match session_header(&headers) {
        Some(session_id) => {
            if !state.sessions.contains(&session_id) {
                return protocol_error(
                    StatusCode::NOT_FOUND,
                    SESSION_NOT_FOUND,
                    "Session not found",
                );
            }

            respond(&state, request, &session_id, accepts_sse).await
        }
        None if request.method == "initialize" => {
            let session_id = state.sessions.create();
            respond(&state, request, &session_id, accepts_sse).await
        }
        None => protocol_error(StatusCode::BAD_REQUEST, SESSION_REQUIRED, NO_SESSION_MESSAGE),
    }
}

/// Server-to-client SSE stream handler
///
/// Opens the session's event stream with keep-alive framing. The
/// stream stays open until the session is deleted or the client
/// disconnects.
///
/// # Errors
///
/// - 400 when the session header is missing
/// - 404 when the session is unknown
/// - 409 when the session already has a live stream
pub async fn mcp_get(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(session_id) = session_header(&headers) else {
        return protocol_error(StatusCode::BAD_REQUEST, SESSION_REQUIRED, NO_SESSION_MESSAGE);
    };

    match state.sessions.open_stream(&session_id) {
        Ok(stream) => {
            let res = Sse::new(stream).keep_alive(KeepAlive::new()).into_response();
            with_session(res, &session_id)
        }
        Err(StreamError::SessionNotFound) => {
            protocol_error(StatusCode::NOT_FOUND, SESSION_NOT_FOUND, "Session not found")
        }
        Err(StreamError::StreamAlreadyOpen) => protocol_error(
            StatusCode::CONFLICT,
            INVALID_REQUEST,
            "Only one SSE stream is allowed per session",
        ),
    }
}

/// Session termination handler
///
/// Removes the session; a live SSE stream ends when its sender is
/// dropped with the session entry.
///
/// # Errors
///
/// - 400 when the session header is missing
/// - 404 when the session is unknown
pub async fn mcp_delete(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(session_id) = session_header(&headers) else {
        return protocol_error(StatusCode::BAD_REQUEST, SESSION_REQUIRED, NO_SESSION_MESSAGE);
    };

    if state.sessions.remove(&session_id) {
        with_session(StatusCode::OK.into_response(), &session_id)
    } else {
        protocol_error(StatusCode::NOT_FOUND, SESSION_NOT_FOUND, "Session not found")
    }
}

/// Health check handler
///
/// Returns server status, version, and the live session count.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_sessions: state.sessions.count(),
    })
}

/// Service info handler for the root route
pub async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: EndpointInfo {
            mcp: MCP_PATH.to_string(),
            health: "/health".to_string(),
        },
    })
}

/// Dispatch a request and shape the transport-level response
async fn respond(
    state: &AppState,
    request: JsonRpcRequest,
    session_id: &str,
    accepts_sse: bool,
) -> Response {
    let is_notification = request.id.is_none();
    let request_id = request.id.clone();

    let response = match state.handlers.dispatch(request).await {
        Ok(response) => response,
        Err(e) => JsonRpcResponse::error(request_id, e.code(), e.message()),
    };

    if is_notification {
        return with_session(StatusCode::ACCEPTED.into_response(), session_id);
    }

    let res = if accepts_sse {
        let data = serde_json::to_string(&response).unwrap_or_default();
        let event = Event::default().event("message").data(data);
        let frame = stream::once(async move { Ok::<_, Infallible>(event) });
        Sse::new(frame).into_response()
    } else {
        Json(response).into_response()
    };

    with_session(res, session_id)
}

fn session_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(MCP_SESSION_ID)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn accepts_event_stream(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("text/event-stream"))
}

/// Protocol-shaped error body with `id: null`
fn protocol_error(status: StatusCode, code: i32, message: &str) -> Response {
    let body = JsonRpcResponse::error(None, code, message.to_string());
    (status, Json(body)).into_response()
}

/// Attach the session id header to a response
fn with_session(mut response: Response, session_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(session_id) {
        response.headers_mut().insert(MCP_SESSION_ID, value);
    }
    response
}
