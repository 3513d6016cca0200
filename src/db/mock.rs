//! Mock Database
//!
//! Seeded key/value records with a configurable per-read delay.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::trace;

use crate::cache::{BoxError, Loader};

// == Database Error ==
/// Failures reported by the database.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DbError {
    /// No record exists for the key
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The database is refusing reads
    #[error("Database unavailable")]
    Unavailable,
}

// == Mock Database ==
/// In-memory database that takes `latency` to answer each read.
#[derive(Debug, Default)]
pub struct MockDb {
    records: HashMap<String, String>,
    latency: Duration,
    unavailable: AtomicBool,
    total_reads: AtomicU64,
    reads: Mutex<HashMap<String, u64>>,
}

impl MockDb {
    // == Constructor ==
    /// Creates a database holding the given records.
    pub fn new<I, K, V>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            records: records
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Creates a database with `count` records `key{i}` -> `value{i}`.
    pub fn seeded(count: usize) -> Self {
        Self::new((0..count).map(|i| (format!("key{}", i), format!("value{}", i))))
    }

    /// Sets the delay applied to every read.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    // == Read ==
    /// Reads a record, sleeping for the configured latency first.
    pub fn read(&self, key: &str) -> Result<String, DbError> {
        self.total_reads.fetch_add(1, Ordering::SeqCst);
        *self.reads.lock().entry(key.to_string()).or_insert(0) += 1;

        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        trace!(key, "Database read");

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable);
        }
        self.records
            .get(key)
            .cloned()
            .ok_or_else(|| DbError::NotFound(key.to_string()))
    }

    /// Makes every subsequent read fail with `Unavailable` until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of reads issued for `key`.
    pub fn reads_of(&self, key: &str) -> u64 {
        self.reads.lock().get(key).copied().unwrap_or(0)
    }

    /// Number of reads issued for any key.
    pub fn total_reads(&self) -> u64 {
        self.total_reads.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Loader for MockDb {
    fn load(&self, key: &str) -> Result<String, BoxError> {
        Ok(self.read(key)?)
    }
}
