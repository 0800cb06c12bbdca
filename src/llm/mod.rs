//! LLM統合システム
//!
//! テキスト補完プロバイダー（OpenAI互換API、オフライン用モック）との統合機能を提供します。

pub mod client;
pub mod config;
pub mod error;
pub mod providers;
pub mod types;

pub use client::LlmClient;
pub use config::LlmConfig;
pub use error::{LlmError, LlmResult};
pub use providers::{CompletionProvider, MockProvider, OpenAIProvider};
pub use types::{LlmRequest, LlmResponse, Message, Role};
