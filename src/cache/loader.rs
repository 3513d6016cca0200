//! Loader Module
//!
//! The capability the cache uses to reach its backing store.

/// Error type a loader may return.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// == Loader Trait ==
/// Synchronously produces the value for a key from the backing store.
///
/// Implementations may be slow and are called concurrently for different
/// keys. A single [`LoadingCache`](super::LoadingCache) never calls `load`
/// concurrently for the same key.
pub trait Loader: Send + Sync {
    /// Fetches the value stored under `key`.
    fn load(&self, key: &str) -> Result<String, BoxError>;
}

impl<F> Loader for F
where
    F: Fn(&str) -> Result<String, BoxError> + Send + Sync,
{
    fn load(&self, key: &str) -> Result<String, BoxError> {
        self(key)
    }
}
