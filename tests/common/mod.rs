//! Shared helpers for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use seo_content_rs::content::ContentGenerator;
use seo_content_rs::llm::{
    CompletionProvider, LlmClient, LlmConfig, LlmError, LlmRequest, LlmResponse, LlmResult,
};
use seo_content_rs::llm::types::TokenUsage;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Binds `app` on an ephemeral port and returns its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Provider that records every request and answers from a script.
#[derive(Clone, Default)]
pub struct RecordingProvider {
    requests: Arc<Mutex<Vec<LlmRequest>>>,
    replies: Arc<Vec<(String, String)>>,
    fail_on: Option<String>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompts containing `needle` are answered with `reply`.
    pub fn reply_when(mut self, needle: &str, reply: &str) -> Self {
        let mut replies = (*self.replies).clone();
        replies.push((needle.to_string(), reply.to_string()));
        self.replies = Arc::new(replies);
        self
    }

    /// Prompts containing `needle` fail.
    pub fn fail_when(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.user_prompt().to_string())
            .collect()
    }

    pub fn generator(&self) -> ContentGenerator {
        let client = LlmClient::with_provider(LlmConfig::mock(), Box::new(self.clone()));
        ContentGenerator::new(Arc::new(client))
    }
}

#[async_trait]
impl CompletionProvider for RecordingProvider {
    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let prompt = request.user_prompt();

        if let Some(needle) = &self.fail_on {
            if prompt.contains(needle.as_str()) {
                return Err(LlmError::ApiError("scripted failure".to_string()));
            }
        }

        let content = self
            .replies
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| format!("reply #{}", self.requests.lock().unwrap().len()));

        Ok(LlmResponse {
            content,
            model: request.model.clone(),
            usage: TokenUsage::new(0, 0),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn name(&self) -> &str {
        "recording"
    }
}
