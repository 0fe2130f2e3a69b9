// Test helper functions

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use unsplash_mcp::core::config::Config;
use unsplash_mcp::core::services::Services;
use unsplash_mcp::http::AppState;
use unsplash_mcp::mcp::handlers::ProtocolHandlers;

/// In-process stand-in for the Unsplash API
///
/// Serves one canned response and records what it was asked, so tests
/// can assert on the outgoing wire (clamped params, auth headers) and
/// on whether upstream was reached at all.
pub struct FakeUnsplash {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    last_params: Arc<Mutex<Option<HashMap<String, String>>>>,
    last_headers: Arc<Mutex<Option<HeaderMap>>>,
}

impl FakeUnsplash {
    /// Number of /search/photos requests served
    #[allow(dead_code)] // Used in integration tests
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Query parameter of the most recent request
    #[allow(dead_code)] // Used in integration tests
    pub fn param(&self, name: &str) -> Option<String> {
        self.last_params
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|params| params.get(name).cloned())
    }

    /// Header of the most recent request
    #[allow(dead_code)] // Used in integration tests
    pub fn header(&self, name: &str) -> Option<String> {
        self.last_headers
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|headers| headers.get(name))
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    body: Value,
    hits: Arc<AtomicUsize>,
    last_params: Arc<Mutex<Option<HashMap<String, String>>>>,
    last_headers: Arc<Mutex<Option<HeaderMap>>>,
}

/// Spawn a fake Unsplash server on an ephemeral loopback port
///
/// The server answers every /search/photos request with the given
/// status and body. It lives until the test runtime shuts down.
#[allow(dead_code)] // Used in integration tests
pub async fn spawn_fake_unsplash(status: StatusCode, body: Value) -> FakeUnsplash {
    let hits = Arc::new(AtomicUsize::new(0));
    let last_params = Arc::new(Mutex::new(None));
    let last_headers = Arc::new(Mutex::new(None));

    let state = FakeState {
        status,
        body,
        hits: Arc::clone(&hits),
        last_params: Arc::clone(&last_params),
        last_headers: Arc::clone(&last_headers),
    };

    let app = Router::new()
        .route("/search/photos", get(record_search))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeUnsplash {
        base_url: format!("http://{addr}"),
        hits,
        last_params,
        last_headers,
    }
}

async fn record_search(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_params.lock().unwrap() = Some(params);
    *state.last_headers.lock().unwrap() = Some(headers);

    (state.status, Json(state.body.clone()))
}

/// Services wired to the given upstream base URL
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services(api_base: &str) -> Arc<Services> {
    let mut config = Config::default();
    config.unsplash.access_key = "test-key".to_string();
    config.unsplash.api_base = api_base.to_string();

    Arc::new(Services::new(config))
}

/// Protocol handlers wired to the given upstream base URL
#[allow(dead_code)] // Used in integration tests
pub fn create_test_handlers(api_base: &str) -> ProtocolHandlers {
    ProtocolHandlers::new(create_test_services(api_base))
}

/// HTTP adapter state wired to the given upstream base URL
#[allow(dead_code)] // Used in integration tests
pub fn create_test_state(api_base: &str) -> AppState {
    AppState::new(create_test_services(api_base))
}
