//! Configuration Module
//!
//! Handles loading and validating server configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default OpenWeatherMap current-weather endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Server configuration parameters.
///
/// Everything except the API key has a sensible default. Values are fixed at
/// process start; there is no reload.
#[derive(Clone)]
pub struct Config {
    /// OpenWeatherMap API key
    pub api_key: String,
    /// Upstream current-weather endpoint
    pub api_url: String,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Entry time-to-live in seconds
    pub cache_ttl: u64,
    /// Upstream request timeout in seconds
    pub fetch_timeout: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Expired-entry sweep interval in seconds, 0 disables the sweep
    pub cleanup_interval: u64,
    /// Path of the static city list
    pub cities_file: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `OPENWEATHERMAP_API_KEY` - Upstream credential (required)
    /// - `OPENWEATHERMAP_API_URL` - Upstream endpoint (default: OpenWeatherMap 2.5)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL` - Entry TTL in seconds (default: 300)
    /// - `FETCH_TIMEOUT` - Upstream timeout in seconds (default: 10)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 0, lazy only)
    /// - `CITIES_FILE` - City list path (default: cities.json)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup and validates it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            api_key: lookup("OPENWEATHERMAP_API_KEY").unwrap_or_default(),
            api_url: lookup("OPENWEATHERMAP_API_URL").unwrap_or(defaults.api_url),
            max_entries: parse_var(&lookup, "MAX_ENTRIES", defaults.max_entries)?,
            cache_ttl: parse_var(&lookup, "CACHE_TTL", defaults.cache_ttl)?,
            fetch_timeout: parse_var(&lookup, "FETCH_TIMEOUT", defaults.fetch_timeout)?,
            server_port: parse_var(&lookup, "SERVER_PORT", defaults.server_port)?,
            cleanup_interval: parse_var(&lookup, "CLEANUP_INTERVAL", defaults.cleanup_interval)?,
            cities_file: lookup("CITIES_FILE").unwrap_or(defaults.cities_file),
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks the settings the store cannot run without.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(CacheError::ConfigurationInvalid(
                "OPENWEATHERMAP_API_KEY is not set; get a key from https://openweathermap.org/api"
                    .to_string(),
            ));
        }
        if self.api_url.trim().is_empty() {
            return Err(CacheError::ConfigurationInvalid(
                "OPENWEATHERMAP_API_URL must not be empty".to_string(),
            ));
        }
        if self.max_entries == 0 {
            return Err(CacheError::ConfigurationInvalid(
                "MAX_ENTRIES must be greater than 0".to_string(),
            ));
        }
        if self.cache_ttl == 0 {
            return Err(CacheError::ConfigurationInvalid(
                "CACHE_TTL must be greater than 0".to_string(),
            ));
        }
        if self.fetch_timeout == 0 {
            return Err(CacheError::ConfigurationInvalid(
                "FETCH_TIMEOUT must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Entry time-to-live as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Upstream request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            max_entries: 1000,
            cache_ttl: 300,
            fetch_timeout: 10,
            server_port: 8080,
            cleanup_interval: 0,
            cities_file: "cities.json".to_string(),
        }
    }
}

// The API key never reaches the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("max_entries", &self.max_entries)
            .field("cache_ttl", &self.cache_ttl)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("server_port", &self.server_port)
            .field("cleanup_interval", &self.cleanup_interval)
            .field("cities_file", &self.cities_file)
            .finish()
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            CacheError::ConfigurationInvalid(format!("{} has an invalid value: '{}'", name, raw))
        }),
        None => Ok(default),
    }
}
