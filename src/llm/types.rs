//! LLM統合の型定義

use serde::{Deserialize, Serialize};

/// メッセージのロール
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// システムメッセージ
    System,
    /// ユーザーメッセージ
    User,
    /// アシスタント（AI）メッセージ
    Assistant,
}

/// チャットメッセージ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// メッセージのロール
    pub role: Role,
    /// メッセージ内容
    pub content: String,
}

impl Message {
    /// 新しいユーザーメッセージを作成
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// LLMリクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    /// 使用するモデル
    pub model: String,
    /// メッセージ履歴
    pub messages: Vec<Message>,
    /// 最大トークン数
    pub max_tokens: u32,
    /// 温度パラメータ（0.0-2.0）
    pub temperature: f32,
}

impl LlmRequest {
    /// 単一のユーザープロンプトからリクエストを作成
    pub fn prompt(prompt: impl Into<String>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message::user(prompt)],
            max_tokens,
            temperature: 0.7,
        }
    }

    /// 温度を設定
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// 最後のユーザーメッセージ本文
    pub fn user_prompt(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}

/// LLMレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// 生成されたテキスト
    pub content: String,
    /// 使用されたモデル
    pub model: String,
    /// 使用トークン数
    #[serde(default)]
    pub usage: TokenUsage,
    /// 完了理由
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// トークン使用量
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TokenUsage {
    /// プロンプトトークン数
    pub prompt_tokens: usize,
    /// 完了トークン数
    pub completion_tokens: usize,
    /// 合計トークン数
    pub total_tokens: usize,
}

impl TokenUsage {
    /// 新しいトークン使用量を作成
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}
