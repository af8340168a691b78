//! API Handlers
//!
//! HTTP request handlers for each weather cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use tracing::info;

use crate::cache::CacheAsideStore;
use crate::config::Config;
use crate::error::Result;
use crate::models::{ClearResponse, HealthResponse, StatsResponse};
use crate::weather::{CityCatalog, OpenWeatherClient, WeatherRecord};

/// Application state shared across all handlers.
///
/// The store is constructed once and handed to the router; handlers never reach
/// for a global instance.
#[derive(Clone)]
pub struct AppState {
    /// Read-through weather cache
    pub cache: CacheAsideStore<WeatherRecord>,
    /// Advertised city codes
    pub cities: Arc<CityCatalog>,
}

impl AppState {
    /// Creates a new AppState from an existing store and city list.
    pub fn new(cache: CacheAsideStore<WeatherRecord>, cities: CityCatalog) -> Self {
        Self {
            cache,
            cities: Arc::new(cities),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the OpenWeatherMap client, the store in front of it and loads the
    /// city list. Fails on any invalid setting.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let source = Arc::new(OpenWeatherClient::from_config(config)?);
        let cache = CacheAsideStore::new(source, config.max_entries, config.ttl());
        let cities = CityCatalog::load(&config.cities_file)?;
        Ok(Self::new(cache, cities))
    }
}

/// Handler for GET /
///
/// Redirects to the city list.
pub async fn root_handler() -> Redirect {
    Redirect::to("/api/weather/cities")
}

/// Handler for GET /api/weather/cities
pub async fn cities_handler(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.cities.codes().to_vec())
}

/// Handler for GET /api/weather/:city_id
///
/// Serves the cached record or fetches a fresh one.
pub async fn weather_handler(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> Result<Json<WeatherRecord>> {
    info!(city_id = %city_id, "weather requested");
    let record = state.cache.get(&city_id).await?;
    Ok(Json(record))
}

/// Handler for GET /api/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for /api/cache/clear
///
/// Empties the cache; counters are kept.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.invalidate_all().await;
    Json(ClearResponse::new(cleared))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
