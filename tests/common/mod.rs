//! Shared helpers for integration tests: a fake OpenWeatherMap upstream and
//! app builders wired to it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use weather_cache::api::create_router;
use weather_cache::weather::{CityCatalog, OpenWeatherClient};
use weather_cache::{AppState, CacheAsideStore};

pub const API_KEY: &str = "test-key";

// == Fake Upstream ==

/// Handle on a running fake upstream.
pub struct Upstream {
    /// Full URL of the fake current-weather endpoint
    pub url: String,
    calls: Arc<AtomicUsize>,
}

impl Upstream {
    /// Number of requests the upstream has received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct UpstreamState {
    calls: Arc<AtomicUsize>,
    delay: Duration,
}

/// Special ids:
/// - `404404` unknown city, `500500` server error
/// - `garbage` non-JSON body, `partial` body missing required fields
/// - `slow` answers after two seconds
async fn fake_weather(
    State(state): State<UpstreamState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);

    if params.get("appid").map(String::as_str) != Some(API_KEY) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"cod": 401}))).into_response();
    }
    if params.get("units").map(String::as_str) != Some("metric") {
        return (StatusCode::BAD_REQUEST, Json(json!({"cod": 400}))).into_response();
    }

    let id = params.get("id").cloned().unwrap_or_default();
    match id.as_str() {
        "404404" => (
            StatusCode::NOT_FOUND,
            Json(json!({"cod": "404", "message": "city not found"})),
        )
            .into_response(),
        "500500" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "garbage" => (StatusCode::OK, "definitely not json").into_response(),
        "partial" => Json(json!({"name": "Partial", "main": {"temp": 1.0}})).into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(payload(&id)).into_response()
        }
        _ => {
            if !state.delay.is_zero() {
                tokio::time::sleep(state.delay).await;
            }
            Json(payload(&id)).into_response()
        }
    }
}

/// OpenWeatherMap-shaped body for `id`.
pub fn payload(id: &str) -> Value {
    json!({
        "coord": {"lon": 79.8478, "lat": 6.9319},
        "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
        "main": {"temp": 29.4, "feels_like": 34.1, "temp_min": 28.9, "temp_max": 30.1, "pressure": 1009, "humidity": 79},
        "wind": {"speed": 5.7, "deg": 250},
        "sys": {"country": "LK", "sunrise": 1697589061, "sunset": 1697632237},
        "id": id,
        "name": format!("City {}", id),
        "cod": 200
    })
}

/// Starts a fake upstream on an ephemeral port; regular ids answer after `delay`.
pub async fn spawn_upstream(delay: Duration) -> Upstream {
    let calls = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/data/2.5/weather", get(fake_weather))
        .with_state(UpstreamState {
            calls: Arc::clone(&calls),
            delay,
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Upstream {
        url: format!("http://{}/data/2.5/weather", addr),
        calls,
    }
}

// == App Builders ==

pub fn client_for(upstream: &Upstream, timeout: Duration) -> OpenWeatherClient {
    OpenWeatherClient::new(&upstream.url, API_KEY, timeout).unwrap()
}

/// Full router backed by the fake upstream.
pub fn create_test_app(upstream: &Upstream, max_entries: usize, ttl: Duration) -> Router {
    let client = client_for(upstream, Duration::from_millis(500));
    let cache = CacheAsideStore::new(Arc::new(client), max_entries, ttl);
    let cities = CityCatalog::new(vec!["1248991".to_string(), "1850147".to_string()]);
    create_router(AppState::new(cache, cities))
}

pub async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
