use crate::llm::LlmConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Completion provider configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Audit spreadsheet configuration
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// TCP bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Log level or filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:4000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            log_level: default_log_level(),
        }
    }
}

/// Audit log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Target spreadsheet; audit is disabled when unset
    #[serde(default)]
    pub spreadsheet_id: Option<String>,

    /// A1 range rows are appended after
    #[serde(default = "default_range")]
    pub range: String,

    /// Service-account JSON key file
    #[serde(default)]
    pub service_account_path: Option<PathBuf>,

    /// Sheets API base URL
    #[serde(default = "default_sheets_base_url")]
    pub sheets_base_url: String,

    /// Replaces the key file's token_uri
    #[serde(default)]
    pub token_uri_override: Option<String>,
}

fn default_range() -> String {
    "Sheet1!A1".to_string()
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            range: default_range(),
            service_account_path: None,
            sheets_base_url: default_sheets_base_url(),
            token_uri_override: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory for file output
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,

    /// Write to stderr
    #[serde(default = "default_true")]
    pub console_enabled: bool,

    /// Write rolling log files
    #[serde(default)]
    pub file_enabled: bool,

    /// daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,

    /// JSON formatted events
    #[serde(default)]
    pub json: bool,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_true() -> bool {
    true
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            console_enabled: true,
            file_enabled: false,
            rotation: default_rotation(),
            json: false,
        }
    }
}
