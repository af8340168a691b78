//! Weather Module
//!
//! The upstream side of the cache: the OpenWeatherMap client used as the
//! cache's data source, the record it produces, and the static city list.

mod cities;
mod client;
mod record;

pub use cities::CityCatalog;
pub use client::OpenWeatherClient;
pub use record::WeatherRecord;
