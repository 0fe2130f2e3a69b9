//! Streamable HTTP transport tests
//!
//! Drives the full router (CORS and logging layers included) with
//! in-process requests via `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use unsplash_mcp::core::types::{HealthResponse, SearchResponse, ServiceInfo};
use unsplash_mcp::http::router;

use crate::common::{create_test_state, photo, search_payload, spawn_fake_unsplash};

/// Router backed by an upstream that must never be reached
fn offline_app() -> Router {
    router(create_test_state("http://127.0.0.1:9"))
}

fn initialize_payload() -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test-client", "version": "0.0.1"}
        }
    })
}

fn post_request(session: Option<&str>, payload: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json");

    if let Some(id) = session {
        builder = builder.header("mcp-session-id", id);
    }

    builder.body(Body::from(payload.to_string())).unwrap()
}

fn bare_request(method: &str, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri("/mcp");

    if let Some(id) = session {
        builder = builder.header("mcp-session-id", id);
    }

    builder.body(Body::empty()).unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64_000)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Run initialize and return the session id the server assigned
async fn initialize_session(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_request(None, &initialize_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    response
        .headers()
        .get("mcp-session-id")
        .expect("initialize response must carry a session id")
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 10_000)
        .await
        .unwrap();
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(health.status, "healthy");
    assert_eq!(health.service, "unsplash-mcp");
    assert_eq!(health.active_sessions, 0);
    assert!(!health.version.is_empty());
}

#[tokio::test]
async fn test_health_counts_live_sessions() {
    let app = offline_app();
    initialize_session(&app).await;
    initialize_session(&app).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = axum::body::to_bytes(response.into_body(), 10_000)
        .await
        .unwrap();
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(health.active_sessions, 2);
}

#[tokio::test]
async fn test_root_lists_service_endpoints() {
    let app = offline_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 10_000)
        .await
        .unwrap();
    let info: ServiceInfo = serde_json::from_slice(&body).unwrap();

    assert_eq!(info.service, "unsplash-mcp");
    assert_eq!(info.endpoints.mcp, "/mcp");
    assert_eq!(info.endpoints.health, "/health");
}

#[tokio::test]
async fn test_initialize_assigns_session() {
    let app = offline_app();

    let response = app
        .clone()
        .oneshot(post_request(None, &initialize_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("mcp-session-id"));

    let body = read_json(response).await;
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 1);
    assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(body["result"]["serverInfo"]["name"], "unsplash-mcp");
}

#[tokio::test]
async fn test_post_without_session_exact_contract() {
    let app = offline_app();
    let payload = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"});

    let response = app.oneshot(post_request(None, &payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert_eq!(
        body,
        json!({
            "jsonrpc": "2.0",
            "error": {
                "code": -32000,
                "message": "Bad Request: No valid session ID provided"
            },
            "id": null
        })
    );
}

#[tokio::test]
async fn test_post_unknown_session_rejected() {
    let app = offline_app();
    let payload = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"});

    let response = app
        .oneshot(post_request(Some("19f0fa27-0000-4000-8000-000000000000"), &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = read_json(response).await;
    assert_eq!(body["error"]["code"], -32001);
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let app = offline_app();

    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from("{not valid json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert_eq!(body["error"]["code"], -32700);
    assert_eq!(body["id"], Value::Null);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let app = offline_app();
    let session_id = initialize_session(&app).await;

    // Initialized notification is accepted with 202 and no body
    let notify = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
    let response = app
        .clone()
        .oneshot(post_request(Some(&session_id), &notify))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let bytes = axum::body::to_bytes(response.into_body(), 1_000).await.unwrap();
    assert!(bytes.is_empty());

    // tools/list works inside the session
    let list = json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"});
    let response = app
        .clone()
        .oneshot(post_request(Some(&session_id), &list))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["result"]["tools"][0]["name"], "search_images");

    // DELETE terminates the session
    let response = app
        .clone()
        .oneshot(bare_request("DELETE", Some(&session_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The session id no longer works
    let response = app
        .clone()
        .oneshot(post_request(Some(&session_id), &list))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_without_session_rejected() {
    let app = offline_app();

    let response = app.oneshot(bare_request("DELETE", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"]["code"], -32000);
}

#[tokio::test]
async fn test_rejected_call_never_reaches_upstream() {
    let fake = spawn_fake_unsplash(StatusCode::OK, search_payload(0, 0, vec![])).await;
    let app = router(create_test_state(&fake.base_url));

    let call = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {"name": "search_images", "arguments": {"query": "cats"}}
    });
    let response = app.oneshot(post_request(None, &call)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fake.hit_count(), 0);
}

#[tokio::test]
async fn test_post_with_sse_accept_returns_event_frame() {
    let app = offline_app();

    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .header("accept", "application/json, text/event-stream")
        .body(Body::from(initialize_payload().to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/event-stream"
    );

    // Single frame: an `event: message` line with the JSON response
    let bytes = axum::body::to_bytes(response.into_body(), 64_000)
        .await
        .unwrap();
    let frame = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(frame.starts_with("event: message\n"));

    let data = frame
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .expect("frame must carry a data line");
    let body: Value = serde_json::from_str(data).unwrap();
    assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn test_get_opens_stream_and_second_conflicts() {
    let app = offline_app();
    let session_id = initialize_session(&app).await;

    let first = app
        .clone()
        .oneshot(bare_request("GET", Some(&session_id)))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(
        first.headers().get("content-type").unwrap(),
        "text/event-stream"
    );

    // While the first stream is alive a second GET is rejected
    let second = app
        .clone()
        .oneshot(bare_request("GET", Some(&session_id)))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    // Dropping the first stream frees the slot
    drop(first);
    let third = app
        .clone()
        .oneshot(bare_request("GET", Some(&session_id)))
        .await
        .unwrap();
    assert_eq!(third.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_ends_open_stream() {
    let app = offline_app();
    let session_id = initialize_session(&app).await;

    let stream_response = app
        .clone()
        .oneshot(bare_request("GET", Some(&session_id)))
        .await
        .unwrap();
    assert_eq!(stream_response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(bare_request("DELETE", Some(&session_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The stream body terminates once its sender is dropped
    let bytes = axum::body::to_bytes(stream_response.into_body(), 64_000)
        .await
        .unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_get_unknown_session_rejected() {
    let app = offline_app();

    let response = app
        .oneshot(bare_request("GET", Some("19f0fa27-0000-4000-8000-000000000000")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_preflight_allow_list() {
    let app = offline_app();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/mcp")
        .header("origin", "https://example.com")
        .header("access-control-request-method", "POST")
        .header(
            "access-control-request-headers",
            "content-type,mcp-session-id",
        )
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_success());

    let headers = response.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");

    let methods = headers
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    for method in ["GET", "POST", "DELETE", "OPTIONS"] {
        assert!(methods.contains(method), "missing method {method}");
    }

    let allowed = headers
        .get("access-control-allow-headers")
        .unwrap()
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(allowed.contains("content-type"));
    assert!(allowed.contains("mcp-session-id"));

    assert_eq!(headers.get("access-control-max-age").unwrap(), "86400");
}

#[tokio::test]
async fn test_cors_exposes_session_header() {
    let app = offline_app();

    let request = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .header("origin", "https://example.com")
        .body(Body::from(initialize_payload().to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    let exposed = response
        .headers()
        .get("access-control-expose-headers")
        .unwrap()
        .to_str()
        .unwrap()
        .to_lowercase();
    assert!(exposed.contains("mcp-session-id"));
}

#[tokio::test]
async fn test_search_images_end_to_end() {
    let photos = vec![
        photo("sunrise-1", Some("Golden hour over the ridge"), None),
        photo("sunrise-2", None, Some("A hazy mountain morning")),
    ];
    let fake = spawn_fake_unsplash(StatusCode::OK, search_payload(2, 1, photos)).await;
    let app = router(create_test_state(&fake.base_url));

    let session_id = initialize_session(&app).await;

    let call = json!({
        "jsonrpc": "2.0",
        "id": 3,
        "method": "tools/call",
        "params": {
            "name": "search_images",
            "arguments": {"query": "mountain sunrise", "per_page": 100}
        }
    });
    let response = app
        .clone()
        .oneshot(post_request(Some(&session_id), &call))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    let text = body["result"]["content"][0]["text"].as_str().unwrap();
    let result: SearchResponse = serde_json::from_str(text).unwrap();

    assert_eq!(result.query, "mountain sunrise");
    assert_eq!(result.results.len(), 2);
    assert_eq!(result.results[0].description, "Golden hour over the ridge");
    assert_eq!(result.results[1].description, "A hazy mountain morning");

    // per_page was clamped before it reached the upstream
    assert_eq!(fake.param("per_page").unwrap(), "30");
}
