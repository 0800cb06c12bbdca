//! HTTP routes
//!
//! ダッシュボードは `/api/...` を呼び出すため、同じルートをルート直下と `/api` 配下の両方で提供する。

use crate::content::{ContentKind, ContentTag, GeneratedContent, GenerationRequest};
use crate::error::Error;
use crate::publish::PublicationTarget;
use crate::server::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Plain-text body of `GET /`.
pub const BANNER: &str = "SEO content generation service is running";

/// アプリケーションのルーターを作成
pub fn router(state: Arc<AppState>) -> Router {
    let api = api_routes();

    Router::new()
        .route("/", get(banner))
        .merge(api.clone())
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/test", get(health))
        .route("/generate-multiple-content", post(generate_multiple_content))
        .route("/publish-to-wordpress", post(publish_to_wordpress))
}

/// エラーレスポンス `{success:false, error}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

fn parse_content_kind(value: Option<&str>) -> ContentKind {
    match value {
        Some("page") => ContentKind::Page,
        _ => ContentKind::Post,
    }
}

/// POST /generate-multiple-content のリクエスト
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    pub keyword_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub generate: Option<Vec<String>>,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub generated_content: GeneratedContent,
}

/// POST /publish-to-wordpress のリクエスト
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishBody {
    #[serde(default)]
    pub wordpress: Option<WordPressCredentials>,
    #[serde(default)]
    pub generated_content: Option<GeneratedContent>,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordPressCredentials {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub app_password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub success: bool,
    pub wordpress_post_id: u64,
    pub link: String,
    pub message: String,
}

async fn banner() -> &'static str {
    BANNER
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "API is working!" }))
}

async fn generate_multiple_content(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected generation request body");
        ApiError::bad_request("Missing required fields")
    })?;

    let tags = body
        .generate
        .unwrap_or_default()
        .iter()
        .map(|name| ContentTag::parse(name))
        .collect::<Vec<_>>();

    let request = GenerationRequest::new(
        body.keyword_name.unwrap_or_default(),
        body.url.unwrap_or_default(),
        tags,
        parse_content_kind(body.content_type.as_deref()),
    )
    .map_err(|e| match e {
        Error::Validation(message) => ApiError::bad_request(message),
        other => ApiError::internal(other.to_string()),
    })?;

    match state.generator.generate(&request).await {
        Ok(generated_content) => Ok(Json(GenerateResponse {
            success: true,
            generated_content,
        })),
        Err(Error::Validation(message)) => Err(ApiError::bad_request(message)),
        Err(e) => {
            error!(error = %e, keyword = request.keyword_name(), "Error generating content");
            Err(ApiError::internal("Failed to generate content"))
        }
    }
}

async fn publish_to_wordpress(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PublishBody>, JsonRejection>,
) -> Result<Json<PublishResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected publish request body");
        ApiError::bad_request("Missing WordPress credentials")
    })?;

    let kind = parse_content_kind(body.content_type.as_deref());
    let credentials = body.wordpress.unwrap_or_default();
    let target = PublicationTarget::new(
        credentials.url.unwrap_or_default(),
        credentials.username.unwrap_or_default(),
        credentials.app_password.unwrap_or_default(),
    );
    let content = body.generated_content.unwrap_or_default();

    match state.publisher.publish(&target, &content, kind).await {
        Ok(result) => {
            info!(kind = %kind, id = result.remote_id, updated = result.was_update, "Published to WordPress");
            Ok(Json(PublishResponse {
                success: true,
                wordpress_post_id: result.remote_id,
                message: result.message(kind),
                link: result.canonical_link,
            }))
        }
        Err(Error::Validation(message)) => Err(ApiError::bad_request(message)),
        Err(Error::Publication(message)) => Err(ApiError::internal(message)),
        Err(e) => {
            error!(error = %e, "Error publishing to WordPress");
            Err(ApiError::internal(format!(
                "Failed to publish {} to WordPress",
                kind
            )))
        }
    }
}
