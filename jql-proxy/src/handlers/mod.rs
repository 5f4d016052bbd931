//! HTTP handlers for jql-proxy.

pub mod jql;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub const READINESS_MESSAGE: &str =
    "JQL Proxy Server is running and waiting for POST requests on /generate-jql";

/// Static readiness text, independent of configuration.
pub async fn index() -> &'static str {
    READINESS_MESSAGE
}

/// Health check endpoint for container liveness probes.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "jql-proxy",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
