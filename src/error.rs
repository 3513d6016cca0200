//! Error types for the loading cache
//!
//! Provides unified error handling using thiserror.

use std::error::Error as StdError;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cache::BoxError;
use crate::db::DbError;

/// Failure cause shared between every caller waiting on the same load.
pub type SharedCause = Arc<dyn StdError + Send + Sync>;

// == Cache Error Enum ==
/// Unified error type for the cache and its HTTP surface.
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// The backing store could not produce a value for a key
    #[error("Load failed for key '{key}': {cause}")]
    LoadFailure { key: String, cause: SharedCause },

    /// Capacity must be at least one entry
    #[error("Invalid capacity: {0} (must be greater than zero)")]
    InvalidCapacity(usize),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// Wraps a loader error for `key`.
    pub fn load_failure(key: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        CacheError::LoadFailure {
            key: key.into(),
            cause: Arc::from(cause.into()),
        }
    }

    /// Returns true when both errors carry the very same load failure.
    pub fn is_same_failure(&self, other: &CacheError) -> bool {
        match (self, other) {
            (
                CacheError::LoadFailure { key: a, cause: ca },
                CacheError::LoadFailure { key: b, cause: cb },
            ) => a == b && Arc::ptr_eq(ca, cb),
            _ => false,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            CacheError::LoadFailure { cause, .. } => match cause.downcast_ref::<DbError>() {
                Some(DbError::NotFound(_)) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            },
            CacheError::InvalidCapacity(_) | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
