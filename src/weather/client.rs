//! OpenWeatherMap client
//!
//! Fetches current conditions for a city id. This is the cache's data source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use crate::cache::DataSource;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::weather::record::OwmResponse;
use crate::weather::WeatherRecord;

/// HTTP client for the OpenWeatherMap current-weather endpoint.
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Creates a client whose every request is bounded by `timeout`.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CacheError::ConfigurationInvalid(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Creates a client from the upstream settings in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, &config.api_key, config.timeout())
    }
}

#[async_trait]
impl DataSource for OpenWeatherClient {
    type Record = WeatherRecord;

    #[instrument(skip(self))]
    async fn fetch(&self, key: &str) -> Result<WeatherRecord> {
        // Errors are stripped of their URL: it carries the API key.
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("id", key), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                if e.is_timeout() {
                    CacheError::DataUnavailable(format!("upstream timed out for '{}'", key))
                } else {
                    CacheError::DataUnavailable(format!("upstream request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CacheError::KeyNotFound(key.to_string()));
        }
        if !status.is_success() {
            return Err(CacheError::DataUnavailable(format!(
                "upstream returned {} for '{}'",
                status, key
            )));
        }

        let payload: OwmResponse = response.json().await.map_err(|e| {
            CacheError::DataUnavailable(format!(
                "malformed upstream response for '{}': {}",
                key,
                e.without_url()
            ))
        })?;

        debug!(key = %key, "upstream record received");
        Ok(payload.into())
    }
}
