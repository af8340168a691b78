//! Cache Module
//!
//! Provides the cache-aside engine: a bounded table with TTL expiration and LRU
//! eviction, fed by a `DataSource` with single-flight fetches.

mod entry;
mod lru;
mod source;
mod stats;
mod store;
mod table;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use source::DataSource;
pub use stats::CacheStats;
pub use store::CacheAsideStore;
pub use table::CacheTable;
