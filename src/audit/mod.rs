//! Audit Log Writer
//!
//! 生成実行ごとに1行をスプレッドシートへ追記する。失敗はログに記録するのみで、
//! リクエストの成否には影響しない。

pub mod record;
pub mod sheets;

pub use record::{AuditRecord, COLUMNS};
pub use sheets::{GoogleSheetsAuditLog, ServiceAccountKey};

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// 監査ログの書き込み先
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// 1行追記
    async fn append(&self, record: &AuditRecord) -> Result<()>;

    /// 書き込み先の名前
    fn name(&self) -> &str;
}

/// Appends `record` on a detached task.
///
/// The returned handle never resolves to an error; failures are only
/// observable through the log.
pub fn spawn_append(log: Arc<dyn AuditLog>, record: AuditRecord) -> JoinHandle<()> {
    tokio::spawn(async move {
        match log.append(&record).await {
            Ok(()) => debug!(run_id = %record.run_id, sink = log.name(), "Audit row appended"),
            Err(e) => error!(
                run_id = %record.run_id,
                sink = log.name(),
                error = %e,
                "Audit log append failed"
            ),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentKind, ContentTag, GeneratedContent, GenerationRequest};
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingLog {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl AuditLog for FailingLog {
        async fn append(&self, _record: &AuditRecord) -> Result<()> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(Error::AuditLog("sheet unavailable".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_spawn_append_swallows_failure() {
        let log = Arc::new(FailingLog {
            attempts: AtomicUsize::new(0),
        });
        let request =
            GenerationRequest::new("k", "u", vec![ContentTag::PageTitle], ContentKind::Post)
                .unwrap();
        let record = AuditRecord::from_run(
            uuid::Uuid::new_v4(),
            &request,
            &GeneratedContent::new(),
            chrono::Utc::now(),
        );

        let handle = spawn_append(log.clone(), record);
        assert!(handle.await.is_ok());
        assert_eq!(log.attempts.load(Ordering::SeqCst), 1);
    }
}
