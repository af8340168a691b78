//! API Routes
//!
//! Configures the Axum router with all weather cache endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cities_handler, clear_handler, health_handler, root_handler, stats_handler, weather_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin so a browser frontend can call the API
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // The static cities route wins over the :city_id capture
    Router::new()
        .route("/", get(root_handler))
        .route("/api/weather/cities", get(cities_handler))
        .route("/api/weather/:city_id", get(weather_handler))
        .route("/api/cache/stats", get(stats_handler))
        .route("/api/cache/clear", get(clear_handler).post(clear_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
