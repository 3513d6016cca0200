//! Cache Module
//!
//! Read-through LRU caching in front of a slow backing store, with
//! concurrent misses on the same key collapsed into a single load.

mod engine;
mod entry;
mod inflight;
mod loader;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use engine::LoadingCache;
pub use entry::Entry;
pub use loader::{BoxError, Loader};
pub use lru::{NodeId, RecencyList};
pub use stats::CacheStats;
pub use store::LruStore;

// == Public Constants ==
/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 100;
