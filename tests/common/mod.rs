//! Shared utilities for integration tests.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use travel_companion::config::AppConfig;
use travel_companion::http::HttpServer;

pub const ADMIN_KEY: &str = "test-admin-key";

/// Default config with a known admin key.
#[allow(dead_code)]
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.admin.api_key = ADMIN_KEY.to_string();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config
}

/// Router built exactly as the server builds it.
#[allow(dead_code)]
pub fn test_app() -> Router {
    HttpServer::new(test_config())
        .expect("default config must compile")
        .router()
}

/// Send one request through the router and decode the JSON body.
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, &[]).await
}

#[allow(dead_code)]
pub fn bearer() -> String {
    format!("Bearer {}", ADMIN_KEY)
}
