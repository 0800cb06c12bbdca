//! Error types for the content generation service.

use crate::llm::LlmError;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for generation, publication and audit operations
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed input, raised before any external call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Completion call failed or returned no usable text
    #[error("Provider error: {0}")]
    Provider(#[from] LlmError),

    /// Remote CMS call failed
    #[error("Publication error: {0}")]
    Publication(String),

    /// Spreadsheet append failed; logged only
    #[error("Audit log error: {0}")]
    AuditLog(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for errors the caller caused.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
