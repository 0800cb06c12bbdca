//! One audit row per generation run.

use crate::content::{GeneratedContent, GenerationRequest};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Column order of the audit sheet.
pub const COLUMNS: [&str; 10] = [
    "timestamp",
    "keywordName",
    "url",
    "keywordList",
    "pageTitle",
    "metaTitle",
    "metaDescription",
    "article",
    "urlWiki",
    "wordpressPostId",
];

/// 監査ログのレコード
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub run_id: uuid::Uuid,
    pub timestamp: DateTime<Utc>,
    pub keyword_name: String,
    pub url: String,
    pub content: GeneratedContent,
}

impl AuditRecord {
    pub fn from_run(
        run_id: uuid::Uuid,
        request: &GenerationRequest,
        content: &GeneratedContent,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            run_id,
            timestamp,
            keyword_name: request.keyword_name().to_string(),
            url: request.url().to_string(),
            content: content.clone(),
        }
    }

    /// Cells in [`COLUMNS`] order; absent fields are empty strings.
    pub fn to_row(&self) -> Vec<String> {
        COLUMNS
            .iter()
            .map(|column| match *column {
                "timestamp" => self
                    .timestamp
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
                "keywordName" => self.keyword_name.clone(),
                "url" => self.url.clone(),
                field => self.content.field(field).to_string(),
            })
            .collect()
    }
}
