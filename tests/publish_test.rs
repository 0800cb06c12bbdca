//! Publication adapter against an in-process fake WordPress REST API.

mod common;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use common::spawn_server;
use seo_content_rs::content::{ContentKind, GeneratedContent};
use seo_content_rs::publish::{PublicationTarget, WordPressPublisher};
use seo_content_rs::Error;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeWordPress {
    items: Mutex<Vec<Value>>,
    calls: AtomicUsize,
    auth_headers: Mutex<Vec<String>>,
}

impl FakeWordPress {
    fn record(&self, headers: &HeaderMap) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(auth) = headers.get("authorization") {
            self.auth_headers
                .lock()
                .unwrap()
                .push(auth.to_str().unwrap().to_string());
        }
    }
}

#[derive(Deserialize)]
struct SlugQuery {
    slug: Option<String>,
}

async fn list(
    State(wp): State<Arc<FakeWordPress>>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Query(query): Query<SlugQuery>,
) -> Json<Value> {
    wp.record(&headers);
    let items = wp.items.lock().unwrap();
    let matches: Vec<Value> = items
        .iter()
        .filter(|item| item["collection"] == collection.as_str())
        .filter(|item| query.slug.as_deref().map_or(true, |s| item["slug"] == s))
        .cloned()
        .collect();
    Json(Value::Array(matches))
}

async fn create(
    State(wp): State<Arc<FakeWordPress>>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    wp.record(&headers);
    let mut items = wp.items.lock().unwrap();
    let id = 100 + items.len() as u64;
    let item = json!({
        "id": id,
        "collection": collection,
        "slug": body["slug"],
        "title": body["title"],
        "content": body["content"],
        "status": body["status"],
        "link": format!("https://wp.test/{}/", body["slug"].as_str().unwrap_or_default()),
    });
    items.push(item.clone());
    (StatusCode::CREATED, Json(item))
}

async fn update(
    State(wp): State<Arc<FakeWordPress>>,
    Path((_collection, id)): Path<(String, u64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    wp.record(&headers);
    let mut items = wp.items.lock().unwrap();
    let item = items
        .iter_mut()
        .find(|item| item["id"] == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    item["title"] = body["title"].clone();
    item["content"] = body["content"].clone();
    item["status"] = body["status"].clone();
    Ok(Json(item.clone()))
}

async fn fake_wordpress() -> (String, Arc<FakeWordPress>) {
    let wp = Arc::new(FakeWordPress::default());
    let app = Router::new()
        .route("/wp-json/wp/v2/{collection}", get(list).post(create))
        .route("/wp-json/wp/v2/{collection}/{id}", axum::routing::post(update))
        .with_state(wp.clone());
    (spawn_server(app).await, wp)
}

fn content(title: Option<&str>, article: &str) -> GeneratedContent {
    let mut content = GeneratedContent::new();
    if let Some(title) = title {
        content.insert("pageTitle", title);
    }
    content.insert("article", article);
    content
}

#[tokio::test]
async fn test_publish_twice_updates_same_item() {
    let (base_url, wp) = fake_wordpress().await;
    let publisher = WordPressPublisher::new().unwrap();
    let target = PublicationTarget::new(format!("{}/", base_url), "admin", "app pass");

    let first = publisher
        .publish(&target, &content(Some("Best Garden Hoses"), "<p>v1</p>"), ContentKind::Post)
        .await
        .unwrap();
    assert!(!first.was_update);
    assert_eq!(first.canonical_link, "https://wp.test/best-garden-hoses/");
    assert_eq!(first.message(ContentKind::Post), "Post created successfully");

    let second = publisher
        .publish(&target, &content(Some("Best Garden Hoses"), "<p>v2</p>"), ContentKind::Post)
        .await
        .unwrap();
    assert!(second.was_update);
    assert_eq!(second.remote_id, first.remote_id);
    assert_eq!(second.message(ContentKind::Post), "Post updated successfully");

    let items = wp.items.lock().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["content"], "<p>v2</p>");
    assert_eq!(items[0]["status"], "publish");

    let auth = wp.auth_headers.lock().unwrap();
    assert!(!auth.is_empty());
    assert!(auth.iter().all(|h| h.starts_with("Basic ")));
}

#[tokio::test]
async fn test_pages_and_posts_are_separate_collections() {
    let (base_url, wp) = fake_wordpress().await;
    let publisher = WordPressPublisher::new().unwrap();
    let target = PublicationTarget::new(base_url, "admin", "pw");
    let body = content(Some("About Hoses"), "<p>a</p>");

    let post = publisher.publish(&target, &body, ContentKind::Post).await.unwrap();
    let page = publisher.publish(&target, &body, ContentKind::Page).await.unwrap();

    assert!(!page.was_update);
    assert_ne!(post.remote_id, page.remote_id);
    assert_eq!(page.message(ContentKind::Page), "Page created successfully");
    assert_eq!(wp.items.lock().unwrap()[1]["collection"], "pages");
}

#[tokio::test]
async fn test_missing_title_uses_fallbacks() {
    let (base_url, wp) = fake_wordpress().await;
    let publisher = WordPressPublisher::new().unwrap();
    let target = PublicationTarget::new(base_url, "admin", "pw");

    publisher
        .publish(&target, &content(None, "<p>x</p>"), ContentKind::Post)
        .await
        .unwrap();
    let updated = publisher
        .publish(&target, &content(None, "<p>y</p>"), ContentKind::Post)
        .await
        .unwrap();

    assert!(updated.was_update);
    let items = wp.items.lock().unwrap();
    assert_eq!(items[0]["slug"], "generated-post");
    assert_eq!(items[0]["title"], "Updated Post");
}

#[tokio::test]
async fn test_validation_makes_no_network_calls() {
    let (base_url, wp) = fake_wordpress().await;
    let publisher = WordPressPublisher::new().unwrap();

    let no_password = PublicationTarget::new(base_url.clone(), "admin", "");
    let err = publisher
        .publish(&no_password, &content(Some("T"), "<p>x</p>"), ContentKind::Post)
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let target = PublicationTarget::new(base_url, "admin", "pw");
    let err = publisher
        .publish(&target, &content(Some("T"), ""), ContentKind::Post)
        .await
        .unwrap_err();
    assert!(err.is_validation());

    assert_eq!(wp.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upstream_message_is_surfaced() {
    let app = Router::new().route(
        "/wp-json/wp/v2/posts",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "code": "rest_not_logged_in",
                    "message": "You are not currently logged in.",
                    "data": { "status": 401 }
                })),
            )
        }),
    );
    let base_url = spawn_server(app).await;
    let publisher = WordPressPublisher::new().unwrap();
    let target = PublicationTarget::new(base_url, "admin", "wrong");

    let err = publisher
        .publish(&target, &content(Some("T"), "<p>x</p>"), ContentKind::Post)
        .await
        .unwrap_err();
    match err {
        Error::Publication(message) => assert_eq!(message, "You are not currently logged in."),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unstructured_failure_is_generic() {
    let app = Router::new().route(
        "/wp-json/wp/v2/pages",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let base_url = spawn_server(app).await;
    let publisher = WordPressPublisher::new().unwrap();
    let target = PublicationTarget::new(base_url, "admin", "pw");

    let err = publisher
        .publish(&target, &content(Some("T"), "<p>x</p>"), ContentKind::Page)
        .await
        .unwrap_err();
    match err {
        Error::Publication(message) => {
            assert_eq!(message, "Failed to publish page to WordPress")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_publish_route_end_to_end() {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use seo_content_rs::config::AppConfig;
    use seo_content_rs::server::{router, AppState};
    use tower::ServiceExt;

    let (base_url, _wp) = fake_wordpress().await;
    let app = router(Arc::new(AppState::from_config(AppConfig::default()).unwrap()));

    let body = json!({
        "wordpress": { "url": base_url, "username": "admin", "appPassword": "pw" },
        "generatedContent": { "pageTitle": "Hose Guide", "article": "<p>x</p>" },
        "contentType": "page"
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/publish-to-wordpress")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["wordpressPostId"], 100);
    assert_eq!(json["link"], "https://wp.test/hose-guide/");
    assert_eq!(json["message"], "Page created successfully");
}
