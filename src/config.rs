//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::DEFAULT_CAPACITY;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Interval in seconds between stats log lines
    pub stats_interval: u64,
    /// Number of records seeded into the mock database
    pub db_records: usize,
    /// Simulated latency of each database read in milliseconds
    pub db_latency_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STATS_INTERVAL` - Stats logging frequency in seconds (default: 30)
    /// - `DB_RECORDS` - Records in the mock database (default: 1000)
    /// - `DB_LATENCY_MS` - Simulated read latency in milliseconds (default: 50)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env_or("CACHE_CAPACITY", defaults.capacity),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            stats_interval: env_or("STATS_INTERVAL", defaults.stats_interval),
            db_records: env_or("DB_RECORDS", defaults.db_records),
            db_latency_ms: env_or("DB_LATENCY_MS", defaults.db_latency_ms),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            server_port: 3000,
            stats_interval: 30,
            db_records: 1000,
            db_latency_ms: 50,
        }
    }
}
