//! OpenAPI 文档
//!
//! /openapi.json 输出 OpenAPI 3 文档，/docs 与 /redoc 为读取该文档的浏览页面

use axum::{response::Html, Json};
use utoipa::OpenApi;

use super::dto::{
    AgentValidationResponse, HealthResponse, PublicAgentResponse, PublicSignedUrlRequest,
    RootResponse, SignedUrlRequest, SignedUrlResponse, StatsResponse, VoiceDetailResponse,
    VoiceListResponse, VoiceResponse,
};
use super::error::ErrorResponse;
use super::handlers;

pub const OPENAPI_JSON_PATH: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AI Voice Chat API",
        description = "ElevenLabs voice conversation API: voice directory lookups and signed conversation URLs"
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::list_voices,
        handlers::get_voice_by_agent,
        handlers::get_voice_stats,
        handlers::get_agent_by_public_id,
        handlers::get_signed_url,
        handlers::post_signed_url,
        handlers::validate_agent,
        handlers::get_signed_url_by_public,
        handlers::post_signed_url_by_public,
    ),
    components(schemas(
        VoiceResponse,
        VoiceListResponse,
        VoiceDetailResponse,
        StatsResponse,
        PublicAgentResponse,
        SignedUrlRequest,
        PublicSignedUrlRequest,
        SignedUrlResponse,
        AgentValidationResponse,
        RootResponse,
        HealthResponse,
        ErrorResponse,
    )),
    tags(
        (name = "service", description = "Service metadata and health"),
        (name = "voices", description = "Voice directory lookups"),
        (name = "conversations", description = "Conversation setup via signed URLs")
    )
)]
pub struct ApiDoc;

/// GET /openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /docs - Swagger UI
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

/// GET /redoc
pub async fn redoc() -> Html<&'static str> {
    Html(REDOC_HTML)
}

// 页面资源从 CDN 加载，服务端只提供文档 JSON
const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>AI Voice Chat API - Swagger UI</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
<div id="swagger-ui"></div>
<script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
<script>
window.ui = SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
</script>
</body>
</html>
"##;

const REDOC_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>AI Voice Chat API - ReDoc</title>
</head>
<body>
<redoc spec-url="/openapi.json"></redoc>
<script src="https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js"></script>
</body>
</html>
"#;
