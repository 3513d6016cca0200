//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::LoadingCache;
use crate::config::Config;
use crate::db::MockDb;
use crate::error::{CacheError, Result};
use crate::models::{GetResponse, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// The cache synchronizes itself, so handlers share it through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Read-through cache in front of the mock database
    pub cache: Arc<LoadingCache<MockDb>>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: LoadingCache<MockDb>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Seeds the mock database and sizes the cache from the Config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let db = MockDb::seeded(config.db_records)
            .with_latency(Duration::from_millis(config.db_latency_ms));
        Ok(Self::new(LoadingCache::new(db, config.capacity)?))
    }
}

/// Handler for GET /get/:key
///
/// Retrieves a value through the cache. A miss blocks on the database, so the
/// lookup runs on the blocking thread pool.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let cache = Arc::clone(&state.cache);
    let lookup_key = key.clone();
    let value = tokio::task::spawn_blocking(move || cache.get(&lookup_key))
        .await
        .map_err(|e| CacheError::Internal(format!("lookup task failed: {}", e)))??;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats();
    Json(StatsResponse::new(&stats, state.cache.capacity()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
