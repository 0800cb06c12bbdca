//! Content-type tags
//!
//! 生成対象のコンテンツ種別を表すタグ。リクエストの `generate[]` とレスポンスのキーに使われるワイヤ名を持つ。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// コンテンツ種別タグ
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentTag {
    /// 上位キーワード一覧
    KeywordList,
    /// ページタイトル
    PageTitle,
    /// メタタイトル
    MetaTitle,
    /// メタディスクリプション
    MetaDescription,
    /// 外部参照リンク
    UrlWiki,
    /// 4セクション構成の記事
    Article,
    /// 未知のタグ（汎用プロンプトで生成）
    Custom(String),
}

impl ContentTag {
    /// ワイヤ名を取得
    pub fn as_str(&self) -> &str {
        match self {
            ContentTag::KeywordList => "keywordList",
            ContentTag::PageTitle => "pageTitle",
            ContentTag::MetaTitle => "metaTitle",
            ContentTag::MetaDescription => "metaDescription",
            ContentTag::UrlWiki => "urlWiki",
            ContentTag::Article => "article",
            ContentTag::Custom(name) => name,
        }
    }

    /// ワイヤ名からタグを解決（未知の名前はCustom）
    pub fn parse(name: &str) -> Self {
        match name {
            "keywordList" => ContentTag::KeywordList,
            "pageTitle" => ContentTag::PageTitle,
            "metaTitle" => ContentTag::MetaTitle,
            "metaDescription" => ContentTag::MetaDescription,
            "urlWiki" => ContentTag::UrlWiki,
            "article" => ContentTag::Article,
            other => ContentTag::Custom(other.to_string()),
        }
    }

    /// 後続プロンプトのコンテキストを更新するタグか
    pub fn feeds_context(&self) -> bool {
        matches!(
            self,
            ContentTag::KeywordList | ContentTag::PageTitle | ContentTag::UrlWiki
        )
    }
}

impl fmt::Display for ContentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ContentTag {
    fn from(name: &str) -> Self {
        ContentTag::parse(name)
    }
}

impl Serialize for ContentTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContentTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ContentTag::parse(&name))
    }
}
