//! LLM統合の設定

use crate::llm::error::{LlmError, LlmResult};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Literal API key value that forces mock mode.
pub const MOCK_API_KEY: &str = "mock";

/// LLM設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// APIキー（セキュア）
    #[serde(skip_serializing, default)]
    pub api_key: Option<SecretString>,
    /// OpenAI互換APIのベースURL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 短いフィールド用の低コストモデル
    #[serde(default = "default_short_model")]
    pub short_model: String,
    /// 記事生成用の高性能モデル
    #[serde(default = "default_article_model")]
    pub article_model: String,
    /// 温度
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// リクエストタイムアウト（秒）。未設定ならHTTPクライアントの既定値
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_short_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_article_model() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

impl LlmConfig {
    /// OpenAI設定を作成
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::new(api_key.into().into_boxed_str())),
            ..Self::default()
        }
    }

    /// モック設定（APIキーなし）
    pub fn mock() -> Self {
        Self::default()
    }

    /// ベースURLを設定
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// タイムアウトを取得
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// APIキーを取得（露出）
    pub fn get_api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret())
    }

    /// 有効な認証情報が無い場合はモックモード
    pub fn is_mock(&self) -> bool {
        match self.get_api_key().map(str::trim) {
            None | Some("") => true,
            Some(key) => key == MOCK_API_KEY,
        }
    }

    /// 設定を検証
    pub fn validate(&self) -> LlmResult<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(LlmError::ConfigError(
                "Temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        if self.short_model.trim().is_empty() || self.article_model.trim().is_empty() {
            return Err(LlmError::ConfigError(
                "Model names must not be empty".to_string(),
            ));
        }

        if !self.is_mock() && url::Url::parse(&self.base_url).is_err() {
            return Err(LlmError::ConfigError(format!(
                "Invalid base URL: {}",
                self.base_url
            )));
        }

        Ok(())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            short_model: default_short_model(),
            article_model: default_article_model(),
            temperature: default_temperature(),
            timeout_seconds: None,
        }
    }
}
