#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use jql_proxy::config::{CorsSettings, GeminiSettings, ProxyConfig};
use jql_proxy::services::providers::mock::MockTextProvider;
use jql_proxy::startup::{build_router, AppState};
use secrecy::Secret;
use service_core::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

pub fn test_config(api_key: Option<&str>) -> ProxyConfig {
    ProxyConfig {
        common: Config {
            port: 0,
            ..Config::default()
        },
        gemini: GeminiSettings {
            api_key: api_key.map(|key| Secret::new(key.to_string())),
            ..GeminiSettings::default()
        },
        cors: CorsSettings::default(),
        otlp_endpoint: None,
    }
}

/// Router backed by `provider`, with a configured API key.
pub fn app_with(provider: Arc<MockTextProvider>) -> Router {
    app_with_config(test_config(Some("test-api-key")), provider)
}

pub fn app_with_config(config: ProxyConfig, provider: Arc<MockTextProvider>) -> Router {
    build_router(AppState::new(config, provider)).expect("Failed to build router")
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).expect("Response body is not JSON");
    (status, body)
}

pub async fn text_body(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
