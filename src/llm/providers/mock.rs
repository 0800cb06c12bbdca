//! Deterministic offline provider.

use crate::llm::{
    error::LlmResult,
    providers::CompletionProvider,
    types::{LlmRequest, LlmResponse, TokenUsage},
};
use async_trait::async_trait;

/// Echoes the prompt back inside a fixed, recognizable placeholder.
#[derive(Debug, Clone, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    /// The exact text returned for `prompt`.
    pub fn placeholder(prompt: &str) -> String {
        format!("Mocked response for prompt: \"{}\"", prompt)
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        tracing::warn!(model = %request.model, "Mocking completion response");
        Ok(LlmResponse {
            content: Self::placeholder(request.user_prompt()),
            model: request.model.clone(),
            usage: TokenUsage::default(),
            finish_reason: Some("mock".to_string()),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
