//! LLMクライアント

use crate::llm::{
    config::LlmConfig,
    error::LlmResult,
    providers::{create_provider, CompletionProvider},
    types::LlmRequest,
};
use std::time::Instant;
use tracing::debug;

/// 補完クライアント
///
/// 起動後は読み取り専用で、リクエスト間で共有される。
pub struct LlmClient {
    provider: Box<dyn CompletionProvider>,
    config: LlmConfig,
}

impl LlmClient {
    /// 新しいクライアントを作成
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        config.validate()?;
        let provider = create_provider(&config)?;
        Ok(Self { provider, config })
    }

    /// 任意のプロバイダーでクライアントを作成
    pub fn with_provider(config: LlmConfig, provider: Box<dyn CompletionProvider>) -> Self {
        Self { provider, config }
    }

    /// 設定を取得
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// プロバイダー名を取得
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// テキスト補完: プロンプト、モデル、最大トークン数 -> テキスト
    pub async fn complete(&self, prompt: &str, model: &str, max_tokens: u32) -> LlmResult<String> {
        let request = LlmRequest::prompt(prompt, model, max_tokens)
            .with_temperature(self.config.temperature);
        let started = Instant::now();
        let response = self.provider.complete(&request).await?;
        debug!(
            provider = self.provider.name(),
            model,
            max_tokens,
            latency_ms = started.elapsed().as_millis() as u64,
            "Completion finished"
        );
        Ok(response.content)
    }
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish()
    }
}
