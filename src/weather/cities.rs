//! Static list of the city ids the service advertises.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CacheError, Result};

#[derive(Debug, Deserialize)]
struct CityFile {
    #[serde(rename = "List", default)]
    list: Vec<CityListing>,
}

#[derive(Debug, Deserialize)]
struct CityListing {
    #[serde(rename = "CityCode")]
    city_code: Option<serde_json::Value>,
}

/// City codes loaded once at startup from `{"List": [{"CityCode": ...}]}`.
#[derive(Debug, Clone, Default)]
pub struct CityCatalog {
    codes: Vec<String>,
}

impl CityCatalog {
    pub fn new(codes: Vec<String>) -> Self {
        Self { codes }
    }

    /// Reads and parses the city file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            CacheError::ConfigurationInvalid(format!(
                "cannot read city list {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&raw).map_err(|e| match e {
            CacheError::ConfigurationInvalid(msg) => {
                CacheError::ConfigurationInvalid(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parses the city file contents. Listings without a code are skipped;
    /// numeric codes are accepted as well as strings.
    pub fn parse(raw: &str) -> Result<Self> {
        let file: CityFile = serde_json::from_str(raw)
            .map_err(|e| CacheError::ConfigurationInvalid(format!("invalid city list: {}", e)))?;

        let codes = file
            .list
            .into_iter()
            .filter_map(|listing| match listing.city_code? {
                serde_json::Value::String(code) => Some(code),
                serde_json::Value::Number(code) => Some(code.to_string()),
                _ => None,
            })
            .collect();

        Ok(Self { codes })
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
