//! Configuration management
//!
//! Layered in order: built-in defaults, an optional TOML file, `SEO_`
//! prefixed environment variables, then the plain deployment variables
//! (`OPENAI_API_KEY`, `GOOGLE_SHEET_ID`, `GOOGLE_SERVICE_ACCOUNT_PATH`, `PORT`).

pub mod loader;
pub mod types;

pub use loader::{apply_env_overrides, sample_config, write_sample_config, ConfigLoader};
pub use types::{AppConfig, AuditConfig, LoggingConfig, ServerConfig};
