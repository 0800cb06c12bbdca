//! Google Sheets audit log against fake token and Sheets endpoints.

mod common;

use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::routing::post;
use axum::{Json, Router};
use common::spawn_server;
use seo_content_rs::audit::{AuditLog, AuditRecord, GoogleSheetsAuditLog, COLUMNS};
use seo_content_rs::config::AuditConfig;
use seo_content_rs::content::{
    ContentGenerator, ContentKind, ContentTag, GeneratedContent, GenerationRequest,
};
use seo_content_rs::llm::{LlmClient, LlmConfig};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const TEST_KEY: &str = include_str!("fixtures/test_rsa_key.pem");

#[derive(Default)]
struct FakeGoogle {
    token_calls: AtomicUsize,
    assertions: Mutex<Vec<String>>,
    appends: Mutex<Vec<(String, String, Value)>>,
}

async fn token(
    State(google): State<Arc<FakeGoogle>>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    google.token_calls.fetch_add(1, Ordering::SeqCst);
    if form.get("grant_type").map(String::as_str)
        != Some("urn:ietf:params:oauth:grant-type:jwt-bearer")
    {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "unsupported_grant_type" })));
    }
    google
        .assertions
        .lock()
        .unwrap()
        .push(form.get("assertion").cloned().unwrap_or_default());
    (
        StatusCode::OK,
        Json(json!({ "access_token": "ya29.test", "expires_in": 3599, "token_type": "Bearer" })),
    )
}

async fn append(
    State(google): State<Arc<FakeGoogle>>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string();
    google.appends.lock().unwrap().push((uri.to_string(), auth, body));
    Json(json!({ "updates": { "updatedRows": 1 } }))
}

struct Harness {
    google: Arc<FakeGoogle>,
    config: AuditConfig,
    _dir: tempfile::TempDir,
}

async fn harness() -> Harness {
    let google = Arc::new(FakeGoogle::default());
    let app = Router::new()
        .route("/token", post(token))
        .fallback(append)
        .with_state(google.clone());
    let base_url = spawn_server(app).await;

    let dir = tempfile::tempdir().unwrap();
    let key_path: PathBuf = dir.path().join("service-account.json");
    let key = json!({
        "type": "service_account",
        "client_email": "audit@seo-test.iam.gserviceaccount.com",
        "private_key": TEST_KEY,
        "token_uri": format!("{}/token", base_url),
    });
    std::fs::write(&key_path, key.to_string()).unwrap();

    let config = AuditConfig {
        spreadsheet_id: Some("sheet-123".to_string()),
        service_account_path: Some(key_path),
        sheets_base_url: format!("{}/v4", base_url),
        ..AuditConfig::default()
    };

    Harness {
        google,
        config,
        _dir: dir,
    }
}

fn sample_record() -> AuditRecord {
    let request = GenerationRequest::new(
        "garden hose",
        "https://x.test",
        vec![ContentTag::PageTitle],
        ContentKind::Post,
    )
    .unwrap();
    let mut content = GeneratedContent::new();
    content.insert("pageTitle", "Best Garden Hoses");
    AuditRecord::from_run(uuid::Uuid::new_v4(), &request, &content, chrono::Utc::now())
}

#[tokio::test]
async fn test_append_row_with_service_account_token() {
    let h = harness().await;
    let log = GoogleSheetsAuditLog::from_config(&h.config).unwrap().unwrap();

    log.append(&sample_record()).await.unwrap();
    log.append(&sample_record()).await.unwrap();

    // token is cached between appends
    assert_eq!(h.google.token_calls.load(Ordering::SeqCst), 1);
    let assertion = h.google.assertions.lock().unwrap()[0].clone();
    assert_eq!(assertion.split('.').count(), 3);

    let appends = h.google.appends.lock().unwrap();
    assert_eq!(appends.len(), 2);
    let (uri, auth, body) = &appends[0];
    assert!(uri.contains("/v4/spreadsheets/sheet-123/values/Sheet1!A1:append"), "{uri}");
    assert!(uri.ends_with("valueInputOption=RAW"));
    assert_eq!(auth, "Bearer ya29.test");

    let row = body["values"][0].as_array().unwrap();
    assert_eq!(row.len(), COLUMNS.len());
    assert_eq!(row[1], "garden hose");
    assert_eq!(row[2], "https://x.test");
    assert_eq!(row[3], "");
    assert_eq!(row[4], "Best Garden Hoses");
}

#[tokio::test]
async fn test_generator_appends_after_success() {
    let h = harness().await;
    let log = GoogleSheetsAuditLog::from_config(&h.config).unwrap().unwrap();
    let client = Arc::new(LlmClient::new(LlmConfig::mock()).unwrap());
    let generator = ContentGenerator::new(client).with_audit_log(Arc::new(log));

    let request = GenerationRequest::new(
        "garden hose",
        "https://x.test",
        vec![ContentTag::KeywordList, ContentTag::MetaTitle],
        ContentKind::Post,
    )
    .unwrap();
    let (content, audit) = generator.generate_tracked(&request).await.unwrap();
    audit.expect("audit log configured").await.unwrap();

    let appends = h.google.appends.lock().unwrap();
    let row = appends[0].2["values"][0].as_array().unwrap();
    assert_eq!(row[3], content.field("keywordList"));
    assert_eq!(row[5], content.field("metaTitle"));
}

#[tokio::test]
async fn test_append_failure_does_not_fail_generation() {
    let mut h = harness().await;
    h.config.service_account_path = Some(PathBuf::from("/nonexistent/key.json"));
    let log = GoogleSheetsAuditLog::from_config(&h.config).unwrap().unwrap();
    let client = Arc::new(LlmClient::new(LlmConfig::mock()).unwrap());
    let generator = ContentGenerator::new(client).with_audit_log(Arc::new(log));

    let request = GenerationRequest::new(
        "garden hose",
        "https://x.test",
        vec![ContentTag::PageTitle],
        ContentKind::Post,
    )
    .unwrap();
    let (content, audit) = generator.generate_tracked(&request).await.unwrap();
    assert!(audit.unwrap().await.is_ok());
    assert!(!content.field("pageTitle").is_empty());
    assert!(h.google.appends.lock().unwrap().is_empty());
}
