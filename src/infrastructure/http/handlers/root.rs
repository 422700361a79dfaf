//! Root / Health Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{CheckHealth, HealthReport};
use crate::infrastructure::http::dto::{HealthResponse, RootResponse};
use crate::infrastructure::http::state::AppState;

/// 服务元信息
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service metadata", body = RootResponse)),
    tag = "service"
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        name: "AI Voice Chat API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
    })
}

/// 健康检查 - 查询 voices 表行数
#[utoipa::path(
    get,
    path = "/health",
    responses((
        status = 200,
        description = "Database connectivity; unhealthy is still reported with 200",
        body = HealthResponse
    )),
    tag = "service"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let response = match state.check_health_handler.handle(CheckHealth).await {
        HealthReport::Healthy { voices_count } => HealthResponse {
            status: "healthy".to_string(),
            database: Some("connected".to_string()),
            voices_count: Some(voices_count),
            error: None,
        },
        HealthReport::Unhealthy { error } => HealthResponse {
            status: "unhealthy".to_string(),
            database: None,
            voices_count: None,
            error: Some(error),
        },
    };

    Json(response)
}
