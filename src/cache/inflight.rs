//! In-flight Load Module
//!
//! One slot per backing-store load, shared by the caller performing the load
//! and every caller that missed on the same key while it ran.

use parking_lot::{Condvar, Mutex};
use thiserror::Error;

use crate::error::Result;

/// Cause reported to waiters when the loading caller unwound mid-load.
#[derive(Debug, Error)]
#[error("loader panicked before producing a value")]
pub(crate) struct LoaderPanicked;

// == In-flight Load ==
/// Outcome of a single load, published once and read by any number of waiters.
#[derive(Debug, Default)]
pub(crate) struct InflightLoad {
    outcome: Mutex<Option<Result<String>>>,
    ready: Condvar,
}

impl InflightLoad {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // == Complete ==
    /// Publishes the outcome and wakes all waiters. Later calls are ignored.
    pub(crate) fn complete(&self, outcome: Result<String>) {
        let mut slot = self.outcome.lock();
        if slot.is_none() {
            *slot = Some(outcome);
        }
        drop(slot);
        self.ready.notify_all();
    }

    // == Wait ==
    /// Blocks until the outcome is published and returns a copy of it.
    pub(crate) fn wait(&self) -> Result<String> {
        let mut slot = self.outcome.lock();
        loop {
            if let Some(outcome) = slot.as_ref() {
                return outcome.clone();
            }
            self.ready.wait(&mut slot);
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.outcome.lock().is_some()
    }
}
