#![allow(dead_code)]

pub mod mock_upstream;

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use chat_relay::api::common::{
    CORS_ALLOW_CREDENTIALS, CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS, CORS_ALLOW_ORIGIN,
};
use chat_relay::{build_routes, AppState, RelayConfig};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "nvapi-test-key";

pub fn test_config(upstream_url: &str) -> RelayConfig {
    RelayConfig {
        upstream_url: upstream_url.to_string(),
        api_key: Some(TEST_API_KEY.to_string()),
        ..RelayConfig::default()
    }
}

pub fn test_app(config: RelayConfig) -> Router {
    build_routes(AppState::new(config).unwrap())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", self.text()))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let req = builder
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn assert_cors_headers(headers: &HeaderMap) {
    let expected = [
        ("access-control-allow-credentials", CORS_ALLOW_CREDENTIALS),
        ("access-control-allow-origin", CORS_ALLOW_ORIGIN),
        ("access-control-allow-methods", CORS_ALLOW_METHODS),
        ("access-control-allow-headers", CORS_ALLOW_HEADERS),
    ];
    for (name, value) in expected {
        assert_eq!(
            headers.get(name).and_then(|v| v.to_str().ok()),
            Some(value),
            "header {name}"
        );
    }
}

/// An address nothing listens on
pub fn unreachable_upstream_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/v1/chat/completions", port)
}
