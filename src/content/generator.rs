//! Content Orchestrator
//!
//! 要求されたタグを要求順に1つずつ処理する。前のタグの出力（キーワードリスト、
//! ページタイトル、参照リンク）は後続のプロンプトに渡される。いずれかのタグが
//! 失敗した場合はリクエスト全体を中断し、部分的な結果は返さない。

use crate::audit::{spawn_append, AuditLog, AuditRecord};
use crate::content::article::ArticleAssembler;
use crate::content::context::GenerationContext;
use crate::content::prompts::build_prompt;
use crate::content::tags::ContentTag;
use crate::content::types::{GeneratedContent, GenerationRequest};
use crate::error::Result;
use crate::llm::LlmClient;
use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, Instrument};
use uuid::Uuid;

/// コンテンツ生成器
#[derive(Clone)]
pub struct ContentGenerator {
    client: Arc<LlmClient>,
    article: ArticleAssembler,
    short_model: String,
    audit: Option<Arc<dyn AuditLog>>,
}

impl ContentGenerator {
    /// Models are taken from the client's configuration.
    pub fn new(client: Arc<LlmClient>) -> Self {
        let short_model = client.config().short_model.clone();
        let article_model = client.config().article_model.clone();
        Self {
            article: ArticleAssembler::new(client.clone(), article_model),
            client,
            short_model,
            audit: None,
        }
    }

    /// 監査ログの書き込み先を設定
    pub fn with_audit_log(mut self, audit: Arc<dyn AuditLog>) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn has_audit_log(&self) -> bool {
        self.audit.is_some()
    }

    /// リクエストのタグを順番に生成する
    ///
    /// 監査ログの追記はバックグラウンドで行われ、完了を待たない。
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent> {
        let (content, _audit) = self.generate_tracked(request).await?;
        Ok(content)
    }

    /// [`generate`](Self::generate) と同じだが、監査ログ追記タスクのハンドルも返す
    pub async fn generate_tracked(
        &self,
        request: &GenerationRequest,
    ) -> Result<(GeneratedContent, Option<JoinHandle<()>>)> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "generate",
            %run_id,
            keyword = %request.keyword_name(),
            tags = request.tags().len()
        );

        let content = self.run(request).instrument(span).await?;

        let audit = self.audit.as_ref().map(|audit| {
            let record = AuditRecord::from_run(run_id, request, &content, Utc::now());
            spawn_append(audit.clone(), record)
        });

        info!(%run_id, fields = content.len(), "Content generation completed");
        Ok((content, audit))
    }

    async fn run(&self, request: &GenerationRequest) -> Result<GeneratedContent> {
        let mut ctx = GenerationContext::new(request.keyword_name(), request.url());
        let mut content = GeneratedContent::new();

        for tag in request.tags() {
            debug!(tag = %tag, "Processing");
            let text = match self.generate_tag(tag, &ctx).await {
                Ok(text) => text,
                Err(e) => {
                    error!(tag = %tag, error = %e, "Content generation failed");
                    return Err(e);
                }
            };

            ctx.absorb(tag, &text);
            content.insert(tag.as_str(), text);
            debug!(tag = %tag, "Completed");
        }

        Ok(content)
    }

    async fn generate_tag(&self, tag: &ContentTag, ctx: &GenerationContext) -> Result<String> {
        if *tag == ContentTag::Article {
            return self.article.assemble(ctx).await;
        }

        let prompt = build_prompt(&tag.clone().into(), ctx);
        let text = self
            .client
            .complete(&prompt.text, &self.short_model, prompt.max_tokens)
            .await?;
        Ok(text)
    }
}

impl std::fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentGenerator")
            .field("provider", &self.client.provider_name())
            .field("short_model", &self.short_model)
            .field("article_model", &self.article.model())
            .field("audit", &self.audit.as_ref().map(|a| a.name().to_string()))
            .finish()
    }
}
