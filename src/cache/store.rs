//! Cache-Aside Store Module
//!
//! Read-through cache engine: serves live entries from the table, otherwise
//! fetches from the data source with at most one fetch in flight per key.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, CacheTable, DataSource};
use crate::error::{CacheError, Result};

/// Outcome slot shared by every caller joined to one fetch. `None` until the
/// fetch resolves.
type Flight<V> = watch::Receiver<Option<Result<V>>>;

/// Table and in-flight map live under one lock so a lookup and the decision to
/// lead or join a fetch are atomic.
struct Shared<V> {
    table: CacheTable<V>,
    flights: HashMap<String, Flight<V>>,
}

// == Cache-Aside Store ==
/// Read-through cache in front of a `DataSource`.
///
/// Cheap to clone; clones share the same table, counters and in-flight fetches.
/// The lock is only held for table bookkeeping, never across a fetch, so
/// lookups for different keys proceed in parallel.
pub struct CacheAsideStore<V> {
    shared: Arc<Mutex<Shared<V>>>,
    source: Arc<dyn DataSource<Record = V>>,
}

impl<V> Clone for CacheAsideStore<V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            source: Arc::clone(&self.source),
        }
    }
}

impl<V> CacheAsideStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a store over `source` holding at most `max_entries` records,
    /// each live for `ttl` after it was fetched.
    pub fn new<S>(source: Arc<S>, max_entries: usize, ttl: Duration) -> Self
    where
        S: DataSource<Record = V>,
    {
        let source: Arc<dyn DataSource<Record = V>> = source;
        Self {
            shared: Arc::new(Mutex::new(Shared {
                table: CacheTable::new(max_entries, ttl),
                flights: HashMap::new(),
            })),
            source,
        }
    }

    // == Get ==
    /// Returns the record for `key`, fetching it on a miss.
    ///
    /// A live entry is a hit and never touches the data source. Otherwise the
    /// first caller starts a fetch and every concurrent caller for the same key
    /// waits for that one outcome. A successful fetch is cached; a failure is
    /// returned to all waiters and nothing is cached, so the next call retries.
    pub async fn get(&self, key: &str) -> Result<V> {
        let mut flight = {
            let mut shared = self.shared.lock().await;

            if let Some(value) = shared.table.lookup(key) {
                debug!(key = %key, "cache hit");
                return Ok(value);
            }

            match shared.flights.get(key) {
                Some(flight) => {
                    debug!(key = %key, "cache miss, joining in-flight fetch");
                    flight.clone()
                }
                None => {
                    info!(key = %key, "cache miss, fetching from data source");
                    let (tx, rx) = watch::channel(None);
                    shared.flights.insert(key.to_string(), rx.clone());
                    self.spawn_fetch(key.to_string(), tx);
                    rx
                }
            }
        };

        let outcome = flight
            .wait_for(|slot| slot.is_some())
            .await
            .ok()
            .and_then(|done| (*done).clone());

        outcome.unwrap_or_else(|| {
            Err(CacheError::Internal(format!(
                "fetch for '{}' ended without an outcome",
                key
            )))
        })
    }

    /// Runs the fetch detached from the calling request so that a caller that
    /// goes away never strands the others joined to the same key.
    fn spawn_fetch(&self, key: String, tx: watch::Sender<Option<Result<V>>>) {
        let shared = Arc::clone(&self.shared);
        let source = Arc::clone(&self.source);

        tokio::spawn(async move {
            let fetch_key = key.clone();
            // Inner task contains a panicking source
            let outcome = match tokio::spawn(async move { source.fetch(&fetch_key).await }).await
            {
                Ok(outcome) => outcome,
                Err(e) => Err(CacheError::DataUnavailable(format!(
                    "fetch task for '{}' failed: {}",
                    key, e
                ))),
            };

            {
                let mut shared = shared.lock().await;
                match &outcome {
                    Ok(value) => {
                        let evicted = shared.table.insert(key.clone(), value.clone());
                        if evicted > 0 {
                            debug!(key = %key, evicted, "capacity reached, evicted LRU entries");
                        }
                    }
                    Err(e) => warn!(key = %key, error = %e, "fetch failed, nothing cached"),
                }
                shared.flights.remove(&key);
            }

            tx.send_replace(Some(outcome));
        });
    }

    // == Invalidate All ==
    /// Empties the cache. Counters are not reset.
    ///
    /// Returns the number of entries removed. Fetches already in flight still
    /// store their result when they complete.
    pub async fn invalidate_all(&self) -> usize {
        let cleared = self.shared.lock().await.table.clear();
        info!(cleared, "cache cleared");
        cleared
    }

    // == Stats ==
    /// Returns a read-only snapshot of the counters and configuration.
    pub async fn stats(&self) -> CacheStats {
        self.shared.lock().await.table.stats()
    }

    // == Purge Expired ==
    /// Drops expired entries ahead of their next lookup. Counters are not touched.
    pub async fn purge_expired(&self) -> usize {
        self.shared.lock().await.table.purge_expired()
    }

    /// Current number of entries, live or not yet discovered as expired.
    pub async fn len(&self) -> usize {
        self.shared.lock().await.table.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.shared.lock().await.table.is_empty()
    }

    /// Whether `key` has a live entry, without counting a lookup.
    pub async fn contains(&self, key: &str) -> bool {
        self.shared.lock().await.table.contains_live(key)
    }
}
