//! Google Sheets audit log
//!
//! サービスアカウントのJWTをアクセストークンに交換し、`values:append` で1行追記する。

use crate::audit::{AuditLog, AuditRecord};
use crate::config::AuditConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// サービスアカウントキー（JSONキーファイルの必要部分のみ）
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: SecretString,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// キーファイルを読み込む
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::AuditLog(format!(
                "Cannot read service account key {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            Error::AuditLog(format!(
                "Invalid service account key {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// RS256署名済みのJWTアサーションを作成
    pub fn assertion(&self, audience: &str, now: DateTime<Utc>) -> Result<String> {
        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: SHEETS_SCOPE,
            aud: audience,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.private_key.expose_secret().as_bytes())
            .map_err(|e| Error::AuditLog(format!("Invalid service account private key: {}", e)))?;
        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| Error::AuditLog(format!("Failed to sign assertion: {}", e)))
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Serialize)]
struct AppendBody<'a> {
    values: [&'a [String]; 1],
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Google Sheets への監査ログ
pub struct GoogleSheetsAuditLog {
    client: Client,
    spreadsheet_id: String,
    range: String,
    key_path: PathBuf,
    sheets_base_url: String,
    token_uri_override: Option<String>,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleSheetsAuditLog {
    /// Builds the writer, or `None` when no spreadsheet is configured.
    ///
    /// The key file is read lazily on the first append.
    pub fn from_config(config: &AuditConfig) -> Result<Option<Self>> {
        let Some(spreadsheet_id) = config
            .spreadsheet_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
        else {
            return Ok(None);
        };

        let key_path = config.service_account_path.clone().ok_or_else(|| {
            Error::Config("audit.service_account_path is required for the audit log".to_string())
        })?;

        let client = Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("HTTP client build failed: {}", e)))?;

        Ok(Some(Self {
            client,
            spreadsheet_id: spreadsheet_id.to_string(),
            range: config.range.clone(),
            key_path,
            sheets_base_url: config.sheets_base_url.clone(),
            token_uri_override: config.token_uri_override.clone(),
            token: Mutex::new(None),
        }))
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// `.../spreadsheets/{id}/values/{range}:append?valueInputOption=RAW`
    pub fn append_url(&self) -> Result<url::Url> {
        let append_segment = format!("{}:append", self.range);
        let mut url = url::Url::parse(&self.sheets_base_url)
            .map_err(|e| Error::Config(format!("Invalid Sheets base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config("Sheets base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend([
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                append_segment.as_str(),
            ]);
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        Ok(url)
    }

    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() + TOKEN_REFRESH_MARGIN {
                return Ok(token.value.clone());
            }
        }

        let key = ServiceAccountKey::from_file(&self.key_path)?;
        let token_uri = self
            .token_uri_override
            .clone()
            .unwrap_or_else(|| key.token_uri.clone());
        let assertion = key.assertion(&token_uri, Utc::now())?;

        let response = self
            .client
            .post(&token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| Error::AuditLog(format!("Token exchange failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::AuditLog(format!(
                "Token exchange failed ({}): {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::AuditLog(format!("Malformed token response: {}", e)))?;
        debug!(client_email = %key.client_email, "Obtained Sheets access token");

        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(3600));
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }
}

#[async_trait]
impl AuditLog for GoogleSheetsAuditLog {
    async fn append(&self, record: &AuditRecord) -> Result<()> {
        let url = self.append_url()?;
        let token = self.access_token().await?;
        let row = record.to_row();

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&AppendBody {
                values: [row.as_slice()],
            })
            .send()
            .await
            .map_err(|e| Error::AuditLog(format!("Sheets append failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::AuditLog(format!(
                "Google Sheets API error ({}): {}",
                status, body
            )));
        }

        info!(run_id = %record.run_id, spreadsheet = %self.spreadsheet_id, "Wrote audit row to Google Sheet");
        Ok(())
    }

    fn name(&self) -> &str {
        "google-sheets"
    }
}

impl std::fmt::Debug for GoogleSheetsAuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsAuditLog")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("range", &self.range)
            .field("key_path", &self.key_path)
            .finish()
    }
}
