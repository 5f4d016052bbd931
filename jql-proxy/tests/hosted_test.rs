mod common;

use axum::http::StatusCode;
use common::{json_body, post_json, test_config};
use jql_proxy::hosted::HostedApp;
use jql_proxy::services::providers::mock::MockTextProvider;
use jql_proxy::startup::{AppState, Application};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn hosted_app_handles_single_requests() {
    let provider = Arc::new(MockTextProvider::replying(" status = Open "));
    let app = HostedApp::with_state(AppState::new(
        test_config(Some("test-api-key")),
        provider.clone(),
    ))
    .expect("Failed to build hosted app");

    let response = app
        .handle(post_json("/generate-jql", r#"{"text":"open issues"}"#))
        .await;

    let (status, body) = json_body(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jql"], "status = Open");
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn hosted_app_builds_without_api_key() {
    let app = HostedApp::new(test_config(None)).expect("Failed to build hosted app");

    let response = app
        .handle(post_json("/generate-jql", r#"{"text":"open issues"}"#))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn standalone_application_serves_over_tcp() {
    let provider = Arc::new(MockTextProvider::replying("assignee = currentUser()"));
    let app = Application::with_state(AppState::new(
        test_config(Some("test-api-key")),
        provider.clone(),
    ))
    .await
    .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    let client = reqwest::Client::new();

    let index = client
        .get(format!("http://127.0.0.1:{}/", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");
    assert!(index.status().is_success());

    let response = client
        .post(format!("http://127.0.0.1:{}/generate-jql", port))
        .json(&serde_json::json!({ "text": "my issues" }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["jql"], "assignee = currentUser()");
    assert_eq!(provider.call_count(), 1);
}
