//! Voice Directory HTTP Handlers

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use std::sync::Arc;

use crate::application::{GetVoiceByAgent, GetVoiceStats, ListVoices, ResolvePublicId};
use crate::domain::voice::{AgentId, PublicId, VoiceListLimit};
use crate::infrastructure::http::dto::{
    ListVoicesParams, PublicAgentResponse, StatsResponse, VoiceDetailResponse, VoiceListResponse,
};
use crate::infrastructure::http::error::{ApiError, ErrorResponse};
use crate::infrastructure::http::state::AppState;

/// 语音代理列表
#[utoipa::path(
    get,
    path = "/api/voices/list",
    params(ListVoicesParams),
    responses(
        (status = 200, description = "Voices with a registered agent, newest first", body = VoiceListResponse),
        (status = 400, description = "limit out of range", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    tag = "voices"
)]
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListVoicesParams>, QueryRejection>,
) -> Result<Json<VoiceListResponse>, ApiError> {
    let Query(params) = params?;
    let limit = match params.limit {
        Some(limit) => VoiceListLimit::new(limit)?,
        None => VoiceListLimit::default(),
    };

    let query = ListVoices {
        user_id: params.user_id,
        limit,
    };

    let result = state.list_voices_handler.handle(query).await?;

    Ok(Json(result.into()))
}

/// 根据 agent_id 获取语音详情
#[utoipa::path(
    get,
    path = "/api/voices/agent/{agent_id}",
    params(("agent_id" = String, Path, description = "ElevenLabs agent ID")),
    responses(
        (status = 200, description = "Voice record", body = VoiceDetailResponse),
        (status = 404, description = "Unknown agent ID", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    tag = "voices"
)]
pub async fn get_voice_by_agent(
    State(state): State<Arc<AppState>>,
    agent_id: Result<Path<String>, PathRejection>,
) -> Result<Json<VoiceDetailResponse>, ApiError> {
    let query = GetVoiceByAgent {
        agent_id: AgentId::new(agent_id?.0)?,
    };

    let result = state.get_voice_by_agent_handler.handle(query).await?;

    Ok(Json(result.into()))
}

/// voices 表统计
#[utoipa::path(
    get,
    path = "/api/voices/stats",
    responses(
        (status = 200, description = "Row counts", body = StatsResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    tag = "voices"
)]
pub async fn get_voice_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, ApiError> {
    let result = state.get_voice_stats_handler.handle(GetVoiceStats).await?;

    Ok(Json(result.into()))
}

/// public_id → agent_id
#[utoipa::path(
    get,
    path = "/api/voices/public/{public_id}",
    params(("public_id" = String, Path, description = "Public link identifier")),
    responses(
        (status = 200, description = "Resolved agent", body = PublicAgentResponse),
        (status = 404, description = "Unknown public ID or no agent registered", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    tag = "voices"
)]
pub async fn get_agent_by_public_id(
    State(state): State<Arc<AppState>>,
    public_id: Result<Path<String>, PathRejection>,
) -> Result<Json<PublicAgentResponse>, ApiError> {
    let query = ResolvePublicId {
        public_id: PublicId::new(public_id?.0)?,
    };

    let result = state.resolve_public_id_handler.handle(query).await?;

    tracing::info!(public_id = %result.public_id, "Public ID resolved");

    Ok(Json(result.into()))
}
