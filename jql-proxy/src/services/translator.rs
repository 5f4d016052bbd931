//! Free text to JQL translation.
//!
//! Wraps a [`TextProvider`] with the fixed system instruction and sampling
//! temperature. The model output is trimmed and returned as-is; no attempt
//! is made to validate the JQL.

use super::providers::{GenerationParams, ProviderError, TextProvider};
use std::sync::Arc;

/// Steering prompt sent with every translation.
pub const JQL_SYSTEM_INSTRUCTION: &str = "You are a JQL expert. Your only task is to translate a \
text description into a single, valid JQL string. Never add any additional explanation, \
introduction, Markdown formatting (e.g. ```jql) or any other text. Output only the raw JQL. \
Use the operators 'AND', 'OR', 'NOT' and fields such as 'project', 'status', 'priority', \
'assignee', 'reporter', 'issuetype', 'resolution', 'created', 'updated'.";

/// Low temperature keeps the model literal.
pub const JQL_TEMPERATURE: f32 = 0.1;

#[derive(Clone)]
pub struct JqlTranslator {
    provider: Arc<dyn TextProvider>,
}

impl JqlTranslator {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Translate `text` into a JQL expression.
    pub async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let params = GenerationParams {
            temperature: Some(JQL_TEMPERATURE),
        };

        let response = self
            .provider
            .generate(text, Some(JQL_SYSTEM_INSTRUCTION), &params)
            .await?;

        tracing::debug!(
            model = %self.provider.model(),
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Translation completed"
        );

        Ok(response.text.trim().to_string())
    }
}
