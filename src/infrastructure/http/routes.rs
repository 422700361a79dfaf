//! HTTP Routes
//!
//! API Endpoints:
//! - /                                          GET       服务信息
//! - /health                                    GET       数据库连通性检查
//! - /openapi.json                              GET       OpenAPI 文档
//! - /docs, /redoc                              GET       文档浏览页面
//! - /api/voices/list                           GET       语音代理列表（user_id, limit）
//! - /api/voices/agent/{agent_id}               GET       根据 agent_id 获取详情
//! - /api/voices/stats                          GET       voices 表统计
//! - /api/voices/public/{public_id}             GET       public_id → agent_id
//! - /api/conversations/signed-url              GET/POST  申请 Signed URL（agent_id）
//! - /api/conversations/validate-agent/{id}     GET       agent_id 有效性检查
//! - /api/conversations/signed-url-by-public    GET/POST  申请 Signed URL（public_id）

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::openapi;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(openapi::OPENAPI_JSON_PATH, get(openapi::openapi_json))
        .route("/docs", get(openapi::swagger_ui))
        .route("/redoc", get(openapi::redoc))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/voices", voice_routes())
        .nest("/conversations", conversation_routes())
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_voices))
        .route("/agent/:agent_id", get(handlers::get_voice_by_agent))
        .route("/stats", get(handlers::get_voice_stats))
        .route("/public/:public_id", get(handlers::get_agent_by_public_id))
}

/// Conversation 路由
fn conversation_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/signed-url",
            get(handlers::get_signed_url).post(handlers::post_signed_url),
        )
        .route("/validate-agent/:agent_id", get(handlers::validate_agent))
        .route(
            "/signed-url-by-public",
            get(handlers::get_signed_url_by_public).post(handlers::post_signed_url_by_public),
        )
}
