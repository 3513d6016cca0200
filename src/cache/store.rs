//! LRU Store Module
//!
//! Bounded index plus recency order. Not thread-safe on its own; the
//! [`LoadingCache`](crate::cache::LoadingCache) guards it with a mutex.

use std::collections::HashMap;

use crate::cache::{Entry, NodeId, RecencyList};

// == LRU Store ==
/// Fixed-capacity key/value storage with least-recently-used eviction.
///
/// Invariant: `index.len() == order.len() <= capacity` after every call.
#[derive(Debug)]
pub struct LruStore {
    /// Key to position in `order`
    index: HashMap<String, NodeId>,
    /// Recency order, front = most recently used
    order: RecencyList,
    /// Maximum number of entries
    capacity: usize,
}

impl LruStore {
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// Callers validate that `capacity` is non-zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            order: RecencyList::with_capacity(capacity),
            capacity,
        }
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let id = *self.index.get(key)?;
        self.order.move_to_front(id);
        self.order.get(id).map(|entry| entry.value().to_string())
    }

    // == Peek ==
    /// Returns the value for `key` without touching its recency.
    pub fn peek(&self, key: &str) -> Option<&str> {
        let id = self.index.get(key)?;
        self.order.get(*id).map(Entry::value)
    }

    // == Insert ==
    /// Stores a value as the most recently used entry.
    ///
    /// A key that is already present has its entry replaced wholesale.
    /// Otherwise, when the store is full, the least recently used entry is
    /// removed before the new one is linked, and returned.
    pub fn insert(&mut self, key: String, value: String) -> Option<Entry> {
        if let Some(&id) = self.index.get(&key) {
            self.order.replace(id, Entry::new(key, value));
            self.order.move_to_front(id);
            return None;
        }

        let evicted = if self.order.len() >= self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        let id = self.order.push_front(Entry::new(key.clone(), value));
        self.index.insert(key, id);
        evicted
    }

    // == Evict Oldest ==
    fn evict_oldest(&mut self) -> Option<Entry> {
        let entry = self.order.pop_back()?;
        self.index.remove(entry.key());
        Some(entry)
    }

    /// Returns true if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.order.iter().map(|e| e.key().to_string()).collect()
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks that index and order agree.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.index.len() == self.order.len()
            && self.order.len() <= self.capacity
            && self
                .index
                .iter()
                .all(|(key, id)| self.order.get(*id).map(Entry::key) == Some(key.as_str()))
    }
}
