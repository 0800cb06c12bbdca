//! LLM統合のエラー型定義

use thiserror::Error;

/// 補完プロバイダー呼び出しのエラー型
#[derive(Error, Debug)]
pub enum LlmError {
    /// API呼び出しエラー
    #[error("API error: {0}")]
    ApiError(String),

    /// 認証エラー
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// レート制限エラー
    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    /// 無効なリクエスト
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// 使用可能なテキストが返されなかった
    #[error("No content generated by {0}")]
    EmptyResponse(String),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// ネットワークエラー
    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LlmError::ApiError(format!("Malformed response body: {}", err))
        } else {
            LlmError::NetworkError(err.to_string())
        }
    }
}

/// LLM統合システムの結果型
pub type LlmResult<T> = Result<T, LlmError>;
