//! `POST /generate-jql`.

use anyhow::anyhow;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service_core::error::AppError;

use crate::startup::AppState;

pub const MISSING_TEXT_MESSAGE: &str = "No text to translate.";
pub const MISSING_API_KEY_MESSAGE: &str = "the API key is not configured.";

#[derive(Debug, Deserialize)]
pub struct GenerateJqlRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateJqlResponse {
    pub jql: String,
}

/// Translate the request's free text into JQL.
///
/// Input is checked before configuration, and neither failure reaches the
/// upstream API.
pub async fn generate_jql(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateJqlResponse>, AppError> {
    let body = match payload {
        Ok(Json(body @ Value::Object(_))) => body,
        Ok(Json(other)) => {
            tracing::debug!(kind = json_kind(&other), "Rejected non-object request body");
            return Err(AppError::BadRequest(anyhow!(MISSING_TEXT_MESSAGE)));
        }
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
            return Err(AppError::BadRequest(anyhow!(MISSING_TEXT_MESSAGE)));
        }
    };

    let payload: GenerateJqlRequest = serde_json::from_value(body).map_err(|e| {
        tracing::debug!(error = %e, "Request body has an unusable text field");
        AppError::BadRequest(anyhow!(MISSING_TEXT_MESSAGE))
    })?;

    let text = payload
        .text
        .filter(|text| !text.is_empty())
        .ok_or_else(|| AppError::BadRequest(anyhow!(MISSING_TEXT_MESSAGE)))?;

    if !state.config.gemini.is_configured() {
        tracing::warn!("Rejecting translation: GEMINI_API_KEY is not set");
        return Err(AppError::ConfigError(anyhow!(MISSING_API_KEY_MESSAGE)));
    }

    let jql = state.translator.translate(&text).await.map_err(|e| {
        tracing::error!(
            error = %e,
            model = %state.translator.model(),
            "Gemini API call failed"
        );
        AppError::UpstreamError(anyhow::Error::new(e))
    })?;

    Ok(Json(GenerateJqlResponse { jql }))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
