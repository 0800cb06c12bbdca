//! LLMプロバイダー実装

pub mod mock;
pub mod openai;

use crate::llm::{
    config::LlmConfig,
    error::LlmResult,
    types::{LlmRequest, LlmResponse},
};
use async_trait::async_trait;

pub use mock::MockProvider;
pub use openai::OpenAIProvider;

/// 補完プロバイダートレイト
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// 通常の完了リクエスト
    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse>;

    /// プロバイダー名を取得
    fn name(&self) -> &str;
}

/// プロバイダーファクトリー
///
/// 有効なAPIキーが無い場合はネットワークに触れないモックを返す。
pub fn create_provider(config: &LlmConfig) -> LlmResult<Box<dyn CompletionProvider>> {
    if config.is_mock() {
        return Ok(Box::new(MockProvider::new()));
    }
    Ok(Box::new(OpenAIProvider::new(config.clone())?))
}
