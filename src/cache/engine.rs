//! Loading Cache Engine
//!
//! Concurrent read-through LRU cache. Hits and structural updates happen
//! under one short critical section; backing-store loads run outside it,
//! and concurrent misses on the same key share a single load.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cache::inflight::{InflightLoad, LoaderPanicked};
use crate::cache::{CacheStats, Loader, LruStore};
use crate::error::{CacheError, Result};

/// State guarded by the engine's mutex.
#[derive(Debug)]
struct Shared {
    store: LruStore,
    inflight: HashMap<String, Arc<InflightLoad>>,
    stats: CacheStats,
}

/// What a missing caller does once the lock is released.
enum Role {
    Leader(Arc<InflightLoad>),
    Waiter(Arc<InflightLoad>),
}

// == Loading Cache ==
/// Fixed-capacity LRU cache that fills itself from a [`Loader`].
///
/// Share it between threads behind an `Arc`.
///
/// # Example
/// ```
/// use lru_loader::cache::{BoxError, LoadingCache};
///
/// let loader = |key: &str| -> Result<String, BoxError> { Ok(format!("value-{}", key)) };
/// let cache = LoadingCache::new(loader, 2).unwrap();
///
/// assert_eq!(cache.get("a").unwrap(), "value-a");
/// assert_eq!(cache.size(), 1);
/// ```
pub struct LoadingCache<L> {
    loader: L,
    shared: Mutex<Shared>,
}

impl<L: Loader> LoadingCache<L> {
    // == Constructor ==
    /// Creates a cache in front of `loader` holding at most `capacity` entries.
    ///
    /// Returns `InvalidCapacity` when `capacity` is zero.
    pub fn new(loader: L, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self {
            loader,
            shared: Mutex::new(Shared {
                store: LruStore::new(capacity),
                inflight: HashMap::new(),
                stats: CacheStats::new(),
            }),
        })
    }

    // == Get ==
    /// Returns the value for `key`, loading it from the backing store on a miss.
    ///
    /// On a miss exactly one caller runs the load; callers that miss on the
    /// same key meanwhile block until it finishes and receive the same value
    /// or the same `LoadFailure`. A failed load leaves the cache untouched.
    pub fn get(&self, key: &str) -> Result<String> {
        let role = {
            let mut shared = self.shared.lock();
            if let Some(value) = shared.store.get(key) {
                shared.stats.record_hit();
                return Ok(value);
            }
            shared.stats.record_miss();

            match shared.inflight.get(key) {
                Some(flight) => {
                    let flight = Arc::clone(flight);
                    shared.stats.record_coalesced();
                    Role::Waiter(flight)
                }
                None => {
                    let flight = Arc::new(InflightLoad::new());
                    shared.inflight.insert(key.to_string(), Arc::clone(&flight));
                    shared.stats.record_load();
                    Role::Leader(flight)
                }
            }
        };

        match role {
            Role::Waiter(flight) => flight.wait(),
            Role::Leader(flight) => self.load(key, flight),
        }
    }

    // == Load ==
    /// Runs the backing-store load for `key` with the lock released.
    fn load(&self, key: &str, flight: Arc<InflightLoad>) -> Result<String> {
        let guard = LoadGuard {
            cache: self,
            key,
            flight,
        };

        debug!(key, "Loading from backing store");
        let outcome = self
            .loader
            .load(key)
            .map_err(|cause| CacheError::load_failure(key, cause));

        self.publish(key, &guard.flight, outcome)
    }

    // == Publish ==
    /// Records a load outcome, releases the key's in-flight slot and wakes
    /// its waiters, all in one critical section.
    fn publish(
        &self,
        key: &str,
        flight: &Arc<InflightLoad>,
        outcome: Result<String>,
    ) -> Result<String> {
        let mut shared = self.shared.lock();

        if shared
            .inflight
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, flight))
        {
            shared.inflight.remove(key);
        }

        match &outcome {
            Ok(value) => {
                if let Some(evicted) = shared.store.insert(key.to_string(), value.clone()) {
                    shared.stats.record_eviction();
                    debug!(evicted = evicted.key(), "Evicted least recently used entry");
                }
                let len = shared.store.len();
                shared.stats.set_total_entries(len);
            }
            Err(err) => {
                shared.stats.record_load_failure();
                warn!(key, error = %err, "Backing store load failed");
            }
        }

        flight.complete(outcome.clone());
        outcome
    }

    // == Size ==
    /// Returns the current number of entries.
    pub fn size(&self) -> usize {
        self.shared.lock().store.len()
    }

    pub fn capacity(&self) -> usize {
        self.shared.lock().store.capacity()
    }

    /// Returns true if `key` is cached, without touching its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.shared.lock().store.contains(key)
    }

    /// Snapshot of cached keys, most recently used first.
    pub fn keys(&self) -> Vec<String> {
        self.shared.lock().store.keys()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let shared = self.shared.lock();
        let mut stats = shared.stats.clone();
        stats.set_total_entries(shared.store.len());
        stats
    }

    /// The backing-store loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }
}

impl<L> std::fmt::Debug for LoadingCache<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = self.shared.lock();
        f.debug_struct("LoadingCache")
            .field("len", &shared.store.len())
            .field("capacity", &shared.store.capacity())
            .field("inflight", &shared.inflight.len())
            .finish()
    }
}

// == Load Guard ==
/// Releases a leader's in-flight slot if the loader unwinds.
struct LoadGuard<'a, L: Loader> {
    cache: &'a LoadingCache<L>,
    key: &'a str,
    flight: Arc<InflightLoad>,
}

impl<L: Loader> Drop for LoadGuard<'_, L> {
    fn drop(&mut self) {
        if !self.flight.is_complete() {
            let failure = CacheError::load_failure(self.key, LoaderPanicked);
            let _ = self.cache.publish(self.key, &self.flight, Err(failure));
        }
    }
}
