//! Expired Entry Sweep
//!
//! Optional background task that drops expired entries ahead of their next
//! lookup. Expiration is lazy without it; the sweep only reclaims memory
//! sooner and never changes hit, miss or eviction counts.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheAsideStore;

/// Spawns a background task that periodically purges expired cache entries.
///
/// # Arguments
/// * `cache` - Store handle sharing state with the request handlers
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_cleanup_task<V>(
    cache: CacheAsideStore<V>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expired-entry sweep with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired().await;
            if removed > 0 {
                info!("Sweep: removed {} expired entries", removed);
            } else {
                debug!("Sweep: no expired entries found");
            }
        }
    })
}
