use crate::content::ContentKind;
use crate::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::fmt;

/// 公開先のWordPressサイトと認証情報
///
/// 1回の公開処理の間だけ保持し、永続化しない。
#[derive(Clone)]
pub struct PublicationTarget {
    base_url: String,
    username: String,
    credential: SecretString,
}

impl PublicationTarget {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            credential: SecretString::new(credential.into().into_boxed_str()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Application Password
    pub(crate) fn credential(&self) -> &str {
        self.credential.expose_secret()
    }

    /// 3項目すべての存在とURL形式を検証
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty()
            || self.username.trim().is_empty()
            || self.credential().is_empty()
        {
            return Err(Error::Validation(
                "Missing WordPress credentials".to_string(),
            ));
        }

        url::Url::parse(self.base_url.trim())
            .map_err(|e| Error::Validation(format!("Invalid WordPress URL: {}", e)))?;
        Ok(())
    }

    /// `<base>/wp-json/wp/v2/{posts|pages}`
    pub fn endpoint(&self, kind: ContentKind) -> String {
        format!(
            "{}/wp-json/wp/v2/{}",
            self.base_url.trim().trim_end_matches('/'),
            kind.collection()
        )
    }
}

impl fmt::Debug for PublicationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicationTarget")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("credential", &"[REDACTED]")
            .finish()
    }
}

/// 公開結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationResult {
    /// WordPress側のID
    pub remote_id: u64,
    /// 公開URL
    pub canonical_link: String,
    /// 既存アイテムを更新した場合true
    pub was_update: bool,
}

impl PublicationResult {
    /// `Post created successfully` / `Page updated successfully`
    pub fn message(&self, kind: ContentKind) -> String {
        let action = if self.was_update { "updated" } else { "created" };
        format!("{} {} successfully", kind.label(), action)
    }
}
