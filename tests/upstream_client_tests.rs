//! Integration Tests for the OpenWeatherMap client
//!
//! Exercises request shape, payload extraction and error mapping against a
//! fake upstream.

mod common;

use std::time::Duration;

use weather_cache::weather::OpenWeatherClient;
use weather_cache::{CacheError, DataSource};

use common::{client_for, spawn_upstream};

#[tokio::test]
async fn test_fetch_extracts_record() {
    let upstream = spawn_upstream(Duration::ZERO).await;
    let client = client_for(&upstream, Duration::from_secs(2));

    let record = client.fetch("1248991").await.unwrap();

    assert_eq!(record.city_name, "City 1248991");
    assert_eq!(record.description, "scattered clouds");
    assert_eq!(record.temperature, 29.4);
    assert_eq!(record.humidity, 79);
    assert_eq!(record.sunset, 1697632237);
    assert_eq!(upstream.calls(), 1);
}

#[tokio::test]
async fn test_fetch_sends_credentials_and_metric_units() {
    let upstream = spawn_upstream(Duration::ZERO).await;
    let client =
        OpenWeatherClient::new(&upstream.url, "wrong-key", Duration::from_secs(2)).unwrap();

    // The fake upstream rejects anything but the test key with 401
    let err = client.fetch("1248991").await.unwrap_err();
    assert!(matches!(err, CacheError::DataUnavailable(ref msg) if msg.contains("401")));
}

#[tokio::test]
async fn test_fetch_unknown_city() {
    let upstream = spawn_upstream(Duration::ZERO).await;
    let client = client_for(&upstream, Duration::from_secs(2));

    let err = client.fetch("404404").await.unwrap_err();
    assert_eq!(err, CacheError::KeyNotFound("404404".to_string()));
}

#[tokio::test]
async fn test_fetch_server_error() {
    let upstream = spawn_upstream(Duration::ZERO).await;
    let client = client_for(&upstream, Duration::from_secs(2));

    let err = client.fetch("500500").await.unwrap_err();
    assert!(matches!(err, CacheError::DataUnavailable(ref msg) if msg.contains("500")));
}

#[tokio::test]
async fn test_fetch_malformed_body() {
    let upstream = spawn_upstream(Duration::ZERO).await;
    let client = client_for(&upstream, Duration::from_secs(2));

    for id in ["garbage", "partial"] {
        let err = client.fetch(id).await.unwrap_err();
        assert!(matches!(err, CacheError::DataUnavailable(_)), "id {}", id);
    }
}

#[tokio::test]
async fn test_fetch_times_out() {
    let upstream = spawn_upstream(Duration::ZERO).await;
    let client = client_for(&upstream, Duration::from_millis(200));

    let err = client.fetch("slow").await.unwrap_err();
    assert!(matches!(err, CacheError::DataUnavailable(ref msg) if msg.contains("timed out")));
}

#[tokio::test]
async fn test_errors_never_leak_api_key() {
    let client =
        OpenWeatherClient::new("http://127.0.0.1:1/weather", "secret-key", Duration::from_secs(1))
            .unwrap();

    let err = client.fetch("1248991").await.unwrap_err();
    assert!(matches!(err, CacheError::DataUnavailable(_)));
    assert!(!err.to_string().contains("secret-key"));
}
