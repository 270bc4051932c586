//! Test helper utilities for webserver integration tests

use std::net::SocketAddr;
use std::sync::Arc;

use analyzer::{Analyzer, MockWorkflowClient, PersistentCache};
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use shared::AnalyzerConfig;
use tower::ServiceExt;
use webserver::WebServer;

use super::fixtures;

pub fn test_address() -> SocketAddr {
    "127.0.0.1:3000".parse().unwrap()
}

/// Client that completes `runs` workflows with the fixture response
pub fn successful_client(runs: usize) -> MockWorkflowClient {
    let mut client = MockWorkflowClient::new();
    client
        .expect_create_run()
        .times(runs)
        .returning(|| Ok(fixtures::RUN_ID.to_string()));
    client
        .expect_start_run()
        .times(runs)
        .returning(|_, _| Ok(fixtures::workflow_response()));
    client
}

/// Client that must never be called
pub fn idle_client() -> MockWorkflowClient {
    successful_client(0)
}

pub fn create_webserver(client: MockWorkflowClient) -> WebServer<MockWorkflowClient> {
    WebServer::new(test_address(), Analyzer::new(client, &AnalyzerConfig::default()))
}

pub fn create_cached_webserver(
    client: MockWorkflowClient,
    cache: Arc<dyn PersistentCache>,
) -> WebServer<MockWorkflowClient> {
    let analyzer = Analyzer::new(client, &AnalyzerConfig::default()).with_persistent_cache(cache);
    WebServer::new(test_address(), analyzer)
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Send one request through the router and return status plus JSON body
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response).await)
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Helper to wait for async conditions with timeout
pub async fn wait_for_condition<F, Fut>(mut condition: F, timeout_ms: u64) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_millis(timeout_ms);

    loop {
        if condition().await {
            return true;
        }

        if start.elapsed() > timeout {
            return false;
        }

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
}
