//! Data Source Module
//!
//! The contract the cache consumes from whatever produces fresh records.

use async_trait::async_trait;

use crate::error::Result;

// == Data Source ==
/// A slow, possibly rate-limited producer of records keyed by an opaque string.
///
/// Implementations bound their own latency (request timeout) and report
/// failures as `CacheError::DataUnavailable`, or `CacheError::KeyNotFound` when
/// the upstream does not know the key.
#[async_trait]
pub trait DataSource: Send + Sync + 'static {
    /// Record type produced for a key.
    type Record: Clone + Send + Sync + 'static;

    /// Fetches a fresh record for `key`.
    async fn fetch(&self, key: &str) -> Result<Self::Record>;
}
