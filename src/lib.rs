//! Weather Cache - A read-through cache in front of OpenWeatherMap
//!
//! Serves current weather per city id from a bounded in-memory cache with TTL
//! expiration, LRU eviction and single-flight upstream fetches.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod weather;

pub use api::AppState;
pub use cache::{CacheAsideStore, DataSource};
pub use config::Config;
pub use error::CacheError;
pub use tasks::spawn_cleanup_task;
