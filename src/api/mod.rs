//! API Module
//!
//! HTTP handlers and routing for the weather cache REST API.
//!
//! # Endpoints
//! - `GET /` - Redirect to the city list
//! - `GET /api/weather/cities` - List advertised city codes
//! - `GET /api/weather/:city_id` - Current weather, served through the cache
//! - `GET /api/cache/stats` - Cache statistics
//! - `GET|POST /api/cache/clear` - Empty the cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
