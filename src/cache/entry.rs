//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
///
/// The value is immutable once stored; a refresh writes a new entry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The lookup key this entry was written under
    pub key: String,
    /// The stored value
    pub value: V,
    /// Creation time (monotonic)
    pub created_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the entry was written.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Is Live ==
    /// Checks whether the entry is still within its TTL.
    ///
    /// Boundary condition: an entry whose age equals the TTL is no longer live.
    pub fn is_live(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, zero once expired.
    #[allow(dead_code)]
    pub fn ttl_remaining(&self, ttl: Duration) -> Duration {
        ttl.saturating_sub(self.age())
    }
}
