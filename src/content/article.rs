//! Article Assembler
//!
//! 固定の4つのプロンプトを順番に実行し、結果を空行区切りで連結して記事HTMLを組み立てる。

use crate::content::context::GenerationContext;
use crate::content::prompts::{build_prompt, ArticleSection};
use crate::error::Result;
use crate::llm::LlmClient;
use std::sync::Arc;
use tracing::debug;

/// Separator placed between article sections.
pub const SECTION_SEPARATOR: &str = "\n\n";

/// 記事アセンブラー
#[derive(Debug, Clone)]
pub struct ArticleAssembler {
    client: Arc<LlmClient>,
    model: String,
}

impl ArticleAssembler {
    pub fn new(client: Arc<LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Runs the four section rounds against `ctx`.
    ///
    /// `ctx` is borrowed for the whole assembly, so every section sees the
    /// same keyword list and reference link. The first failing round aborts
    /// the article; no partial article is returned.
    pub async fn assemble(&self, ctx: &GenerationContext) -> Result<String> {
        let mut sections = Vec::with_capacity(ArticleSection::ALL.len());

        for section in ArticleSection::ALL {
            let prompt = build_prompt(&section.into(), ctx);
            debug!(section = section.index(), model = %self.model, "Generating article section");
            let text = self
                .client
                .complete(&prompt.text, &self.model, prompt.max_tokens)
                .await?;
            sections.push(text);
        }

        Ok(sections.join(SECTION_SEPARATOR))
    }
}
