//! WordPress REST API publisher
//!
//! スラッグで既存アイテムを検索し、あれば更新、なければ新規作成する。
//! 同じタイトルで何度公開しても同じリモートIDに収束する。

use crate::content::{ContentKind, GeneratedContent};
use crate::error::{Error, Result};
use crate::publish::slug::derive_slug;
use crate::publish::types::{PublicationResult, PublicationTarget};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

const PUBLISH_STATUS: &str = "publish";

/// WordPressのアイテム（必要なフィールドのみ）
#[derive(Debug, Deserialize)]
struct WordPressItem {
    id: u64,
    #[serde(default)]
    link: String,
}

#[derive(Debug, Serialize)]
struct PublishPayload<'a> {
    title: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    slug: Option<&'a str>,
    status: &'static str,
}

#[derive(Debug, Deserialize)]
struct WordPressErrorBody {
    message: String,
}

/// WordPress公開クライアント
#[derive(Debug, Clone)]
pub struct WordPressPublisher {
    client: Client,
}

impl WordPressPublisher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("seo-content-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("HTTP client build failed: {}", e)))?;
        Ok(Self { client })
    }

    /// 生成済みコンテンツを公開する
    ///
    /// 認証情報または `article` が欠けている場合は通信前に `Error::Validation` を返す。
    pub async fn publish(
        &self,
        target: &PublicationTarget,
        content: &GeneratedContent,
        kind: ContentKind,
    ) -> Result<PublicationResult> {
        target.validate()?;

        let article = content
            .get("article")
            .filter(|article| !article.is_empty())
            .ok_or_else(|| Error::Validation("No content provided for publishing".to_string()))?;

        let page_title = content.get("pageTitle").filter(|title| !title.is_empty());
        let slug = derive_slug(page_title);
        let endpoint = target.endpoint(kind);

        debug!(%endpoint, %slug, "Looking up existing WordPress item");
        let existing = self.find_by_slug(target, &endpoint, &slug, kind).await?;

        let (item, was_update) = match existing {
            Some(existing) => {
                let payload = PublishPayload {
                    title: page_title.unwrap_or("Updated Post"),
                    content: article,
                    slug: None,
                    status: PUBLISH_STATUS,
                };
                let url = format!("{}/{}", endpoint, existing.id);
                let item = self
                    .send(self.authorized(self.client.post(&url), target).json(&payload), kind)
                    .await?;
                info!(kind = %kind, id = item.id, link = %item.link, "WordPress item updated");
                (item, true)
            }
            None => {
                let payload = PublishPayload {
                    title: page_title.unwrap_or("New Post"),
                    content: article,
                    slug: Some(&slug),
                    status: PUBLISH_STATUS,
                };
                let item = self
                    .send(
                        self.authorized(self.client.post(&endpoint), target)
                            .json(&payload),
                        kind,
                    )
                    .await?;
                info!(kind = %kind, id = item.id, link = %item.link, "WordPress item created");
                (item, false)
            }
        };

        Ok(PublicationResult {
            remote_id: item.id,
            canonical_link: item.link,
            was_update,
        })
    }

    async fn find_by_slug(
        &self,
        target: &PublicationTarget,
        endpoint: &str,
        slug: &str,
        kind: ContentKind,
    ) -> Result<Option<WordPressItem>> {
        let request = self
            .authorized(self.client.get(endpoint), target)
            .query(&[("slug", slug)]);
        let response = self.dispatch(request, kind).await?;

        // WordPressは配列で返す
        let items: Vec<WordPressItem> = response.json().await.map_err(|e| {
            error!(kind = %kind, error = %e, "Malformed WordPress lookup response");
            generic_failure(kind)
        })?;
        Ok(items.into_iter().next())
    }

    async fn send(&self, request: RequestBuilder, kind: ContentKind) -> Result<WordPressItem> {
        let response = self.dispatch(request, kind).await?;
        response.json().await.map_err(|e| {
            error!(kind = %kind, error = %e, "Malformed WordPress response");
            generic_failure(kind)
        })
    }

    async fn dispatch(&self, request: RequestBuilder, kind: ContentKind) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            error!(kind = %kind, error = %e, "Error publishing to WordPress");
            generic_failure(kind)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!(kind = %kind, %status, body = %body, "WordPress API error");

        Err(match serde_json::from_str::<WordPressErrorBody>(&body) {
            Ok(upstream) if !upstream.message.is_empty() => Error::Publication(upstream.message),
            _ => generic_failure(kind),
        })
    }

    fn authorized(&self, request: RequestBuilder, target: &PublicationTarget) -> RequestBuilder {
        request.basic_auth(target.username(), Some(target.credential()))
    }
}

fn generic_failure(kind: ContentKind) -> Error {
    Error::Publication(format!("Failed to publish {} to WordPress", kind))
}
