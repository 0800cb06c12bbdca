//! OpenAIプロバイダー実装
//!
//! Chat Completions API (`POST {base_url}/chat/completions`) をreqwestで直接呼び出す。

use crate::llm::{
    config::LlmConfig,
    error::{LlmError, LlmResult},
    providers::CompletionProvider,
    types::{LlmRequest, LlmResponse, Message, TokenUsage},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// OpenAIプロバイダー
#[derive(Debug, Clone)]
pub struct OpenAIProvider {
    client: Client,
    config: LlmConfig,
}

impl OpenAIProvider {
    /// 新しいOpenAIプロバイダーを作成
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        config.validate()?;

        if config.get_api_key().is_none() {
            return Err(LlmError::ConfigError("API key is required".to_string()));
        }

        let mut builder = Client::builder().user_agent(concat!(
            "seo-content-rs/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::ConfigError(format!("HTTP client build failed: {}", e)))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// HTTPステータスをエラー種別に変換
    fn classify_status(status: StatusCode, body: String) -> LlmError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                LlmError::AuthError(format!("{}: {}", status, body))
            }
            StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitError(body),
            StatusCode::BAD_REQUEST => LlmError::InvalidRequest(body),
            _ => LlmError::ApiError(format!("OpenAI API error ({}): {}", status, body)),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        let api_key = self
            .config
            .get_api_key()
            .ok_or_else(|| LlmError::ConfigError("API key is required".to_string()))?;

        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let started = Instant::now();
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, error_text));
        }

        let api_response: ChatCompletionResponse = response.json().await?;
        debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Completion received"
        );

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::EmptyResponse(self.name().to_string()))?;

        let content = choice
            .message
            .content
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(LlmError::EmptyResponse(self.name().to_string()));
        }

        let usage = api_response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(LlmResponse {
            content,
            model: api_response.model.unwrap_or_else(|| request.model.clone()),
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    fn name(&self) -> &str {
        "OpenAI"
    }
}

/// チャット完了リクエスト
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f32,
}

/// チャット完了レスポンス
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

/// 選択肢
#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// トークン使用量
#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: usize,
    completion_tokens: usize,
}
