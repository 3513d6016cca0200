//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use lru_loader::{api::create_router, db::MockDb, AppState, LoadingCache};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(capacity: usize) -> (Router, AppState) {
    let cache = LoadingCache::new(MockDb::seeded(100), capacity).unwrap();
    let state = AppState::new(cache);
    (create_router(state.clone()), state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_loads_value() {
    let (app, state) = create_test_app(10);

    let (status, json) = get(&app, "/get/key7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "key7");
    assert_eq!(json["value"], "value7");
    assert_eq!(state.cache.size(), 1);
}

#[tokio::test]
async fn test_get_endpoint_second_request_is_a_hit() {
    let (app, state) = create_test_app(10);

    get(&app, "/get/key1").await;
    let (status, json) = get(&app, "/get/key1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], "value1");
    assert_eq!(state.cache.loader().reads_of("key1"), 1);
}

#[tokio::test]
async fn test_get_endpoint_unknown_key() {
    let (app, state) = create_test_app(10);

    let (status, json) = get(&app, "/get/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("missing"));
    assert_eq!(state.cache.size(), 0);
}

#[tokio::test]
async fn test_get_endpoint_retries_after_outage() {
    let (app, state) = create_test_app(10);

    state.cache.loader().set_unavailable(true);
    let (status, json) = get(&app, "/get/key2").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json.get("error").is_some());
    assert_eq!(state.cache.size(), 0);

    state.cache.loader().set_unavailable(false);
    let (status, json) = get(&app, "/get/key2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], "value2");
    assert_eq!(state.cache.loader().reads_of("key2"), 2);
}

#[tokio::test]
async fn test_get_endpoint_evicts_least_recently_used() {
    let (app, state) = create_test_app(2);

    get(&app, "/get/key1").await;
    get(&app, "/get/key2").await;
    get(&app, "/get/key1").await;
    get(&app, "/get/key3").await;

    assert_eq!(state.cache.keys(), vec!["key3", "key1"]);

    let (_, stats) = get(&app, "/stats").await;
    assert_eq!(stats["evictions"], 1);
    assert_eq!(stats["total_entries"], 2);
    assert_eq!(stats["capacity"], 2);
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_counts() {
    let (app, _) = create_test_app(10);

    get(&app, "/get/key1").await; // miss + load
    get(&app, "/get/key1").await; // hit
    get(&app, "/get/missing").await; // miss + failed load

    let (status, json) = get(&app, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 2);
    assert_eq!(json["loads"], 2);
    assert_eq!(json["load_failures"], 1);
    assert_eq!(json["total_entries"], 1);
    assert!(json["hit_rate"].is_number());
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app(10);

    let (status, json) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}

// == Live Server Tests ==

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_http_requests_share_one_load() {
    let db = MockDb::seeded(10).with_latency(Duration::from_millis(200));
    let state = AppState::new(LoadingCache::new(db, 4).unwrap());
    let app = create_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let requests: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            let url = format!("http://{}/get/key5", addr);
            tokio::spawn(async move { client.get(url).send().await })
        })
        .collect();

    for request in requests {
        let response = request.await.unwrap().unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let json: Value = response.json().await.unwrap();
        assert_eq!(json["value"], "value5");
    }

    assert_eq!(state.cache.loader().reads_of("key5"), 1);
    server.abort();
}
