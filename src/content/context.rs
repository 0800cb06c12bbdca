//! Per-request generation context.

use crate::content::tags::ContentTag;

/// Accumulator of previously generated fields, scoped to one request.
///
/// Created when a request starts and dropped when it ends. Only
/// `keywordList`, `pageTitle` and `urlWiki` outputs are absorbed; later
/// prompts read them through [`crate::content::prompts::build_prompt`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationContext {
    pub keyword: String,
    pub url: String,
    pub keyword_list: Option<String>,
    pub page_title: Option<String>,
    pub reference_link: Option<String>,
}

impl GenerationContext {
    pub fn new(keyword: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Record the output of `tag` if later prompts depend on it.
    pub fn absorb(&mut self, tag: &ContentTag, text: &str) {
        let slot = match tag {
            ContentTag::KeywordList => &mut self.keyword_list,
            ContentTag::PageTitle => &mut self.page_title,
            ContentTag::UrlWiki => &mut self.reference_link,
            _ => return,
        };
        *slot = Some(text.to_string());
    }

    pub fn keyword_list(&self) -> &str {
        self.keyword_list.as_deref().unwrap_or("")
    }

    pub fn page_title(&self) -> &str {
        self.page_title.as_deref().unwrap_or("")
    }

    pub fn reference_link(&self) -> &str {
        self.reference_link.as_deref().unwrap_or("")
    }
}
