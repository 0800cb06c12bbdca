use crate::audit::GoogleSheetsAuditLog;
use crate::config::AppConfig;
use crate::content::ContentGenerator;
use crate::error::Result;
use crate::llm::LlmClient;
use crate::publish::WordPressPublisher;
use std::sync::Arc;
use tracing::{info, warn};

/// 全リクエストで共有される読み取り専用の状態
#[derive(Debug)]
pub struct AppState {
    pub generator: ContentGenerator,
    pub publisher: WordPressPublisher,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(generator: ContentGenerator, publisher: WordPressPublisher, config: AppConfig) -> Self {
        Self {
            generator,
            publisher,
            config,
        }
    }

    /// 設定から生成器・公開クライアント・監査ログを組み立てる
    ///
    /// 監査ログの構築に失敗した場合は警告を出して監査なしで続行する。
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let client = Arc::new(LlmClient::new(config.llm.clone())?);
        info!(provider = client.provider_name(), "Completion provider ready");

        let mut generator = ContentGenerator::new(client);
        match GoogleSheetsAuditLog::from_config(&config.audit) {
            Ok(Some(log)) => {
                info!(spreadsheet = log.spreadsheet_id(), "Audit log enabled");
                generator = generator.with_audit_log(Arc::new(log));
            }
            Ok(None) => warn!("No spreadsheet configured, audit log disabled"),
            Err(e) => warn!(error = %e, "Audit log disabled"),
        }

        let publisher = WordPressPublisher::new()?;
        Ok(Self::new(generator, publisher, config))
    }
}
