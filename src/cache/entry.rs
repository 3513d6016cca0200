//! Cache Entry Module
//!
//! Defines the immutable key/value pair held by the cache.

// == Entry ==
/// A cached key/value pair.
///
/// Entries are never mutated in place; a reload replaces the whole entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: String,
    value: String,
}

impl Entry {
    // == Constructor ==
    /// Creates a new entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The key this entry is indexed under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The cached value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consumes the entry, returning its parts.
    pub fn into_parts(self) -> (String, String) {
        (self.key, self.value)
    }
}
