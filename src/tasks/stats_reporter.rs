//! Stats Reporter Task
//!
//! Background task that periodically logs cache statistics.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStats, Loader, LoadingCache};

/// Spawns a background task that logs cache statistics every interval.
///
/// The task runs until aborted. Reading stats only takes the cache lock
/// briefly, so it never waits on an in-flight load.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `interval_secs` - Interval in seconds between reports
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(LoadingCache::new(MockDb::seeded(100), 10)?);
/// let stats_handle = spawn_stats_task(cache.clone(), 30);
/// // Later, during shutdown:
/// stats_handle.abort();
/// ```
pub fn spawn_stats_task<L>(cache: Arc<LoadingCache<L>>, interval_secs: u64) -> JoinHandle<()>
where
    L: Loader + 'static,
{
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting stats reporter with interval of {} seconds",
            interval.as_secs()
        );

        let mut previous = CacheStats::default();
        loop {
            tokio::time::sleep(interval).await;

            let stats = cache.stats();
            if stats == previous {
                debug!("Cache stats: no activity since last report");
                continue;
            }

            info!(
                hits = stats.hits,
                misses = stats.misses,
                loads = stats.loads,
                load_failures = stats.load_failures,
                coalesced = stats.coalesced,
                evictions = stats.evictions,
                entries = stats.total_entries,
                hit_rate = stats.hit_rate(),
                "Cache stats"
            );
            previous = stats;
        }
    })
}
