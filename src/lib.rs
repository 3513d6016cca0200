//! LRU Loader - A concurrent read-through LRU cache
//!
//! Serves key lookups from a bounded LRU cache, loading misses from a slow
//! backing store and collapsing concurrent misses on one key into one load.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Loader, LoadingCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_stats_task;
