//! Generation request and result types

use crate::content::tags::ContentTag;
use crate::error::{Error, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 公開先のコンテンツ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// 投稿
    #[default]
    Post,
    /// 固定ページ
    Page,
}

impl ContentKind {
    /// WordPress REST APIのコレクション名
    pub fn collection(&self) -> &'static str {
        match self {
            ContentKind::Post => "posts",
            ContentKind::Page => "pages",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Post => "post",
            ContentKind::Page => "page",
        }
    }

    /// 先頭を大文字にした表示名
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Post => "Post",
            ContentKind::Page => "Page",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 生成リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    keyword_name: String,
    url: String,
    tags: Vec<ContentTag>,
    content_kind: ContentKind,
}

impl GenerationRequest {
    /// Validates and builds a request.
    ///
    /// Duplicate tags collapse to their first occurrence, so processing order
    /// is the order of first appearance.
    pub fn new(
        keyword_name: impl Into<String>,
        url: impl Into<String>,
        tags: impl IntoIterator<Item = ContentTag>,
        content_kind: ContentKind,
    ) -> Result<Self> {
        let keyword_name = keyword_name.into();
        let url = url.into();

        if keyword_name.trim().is_empty() || url.trim().is_empty() {
            return Err(Error::Validation("Missing required fields".to_string()));
        }

        let mut unique: Vec<ContentTag> = Vec::new();
        for tag in tags {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }

        if unique.is_empty() {
            return Err(Error::Validation("Missing required fields".to_string()));
        }

        Ok(Self {
            keyword_name,
            url,
            tags: unique,
            content_kind,
        })
    }

    pub fn keyword_name(&self) -> &str {
        &self.keyword_name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn tags(&self) -> &[ContentTag] {
        &self.tags
    }

    pub fn content_kind(&self) -> ContentKind {
        self.content_kind
    }
}

/// Tag -> generated text, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedContent {
    entries: Vec<(String, String)>,
}

impl GeneratedContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`; a replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        let key = key.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((key, text)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value for `key`, or the empty string.
    pub fn field(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for GeneratedContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct GeneratedContentVisitor;

impl<'de> Visitor<'de> for GeneratedContentVisitor {
    type Value = GeneratedContent;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of content tags to generated text")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut content = GeneratedContent::new();
        while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
            // Clients echo back extra fields such as a numeric post id.
            match value {
                serde_json::Value::String(text) => content.insert(key, text),
                serde_json::Value::Number(n) => content.insert(key, n.to_string()),
                serde_json::Value::Bool(b) => content.insert(key, b.to_string()),
                _ => {}
            }
        }
        Ok(content)
    }
}

impl<'de> Deserialize<'de> for GeneratedContent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(GeneratedContentVisitor)
    }
}
