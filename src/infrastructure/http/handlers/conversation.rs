//! Conversation Setup HTTP Handlers
//!
//! GET 从查询参数读取标识，POST 从 JSON body 读取，二者走同一流程

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use std::sync::Arc;

use crate::application::{AgentLookup, CreateSignedUrl, ValidateAgent};
use crate::domain::voice::{AgentId, PublicId};
use crate::infrastructure::http::dto::{
    AgentValidationResponse, PublicSignedUrlRequest, SignedUrlRequest, SignedUrlResponse,
};
use crate::infrastructure::http::error::{ApiError, ErrorResponse};
use crate::infrastructure::http::state::AppState;

async fn create_signed_url(
    state: &AppState,
    target: AgentLookup,
) -> Result<Json<SignedUrlResponse>, ApiError> {
    let response = state
        .create_signed_url_handler
        .handle(CreateSignedUrl { target })
        .await?;

    Ok(Json(response.into()))
}

fn agent_lookup(req: SignedUrlRequest) -> Result<AgentLookup, ApiError> {
    let agent_id = AgentId::new(req.agent_id.unwrap_or_default())?;
    Ok(AgentLookup::ByAgentId(agent_id))
}

fn public_lookup(req: PublicSignedUrlRequest) -> Result<AgentLookup, ApiError> {
    let public_id = PublicId::new(req.public_id.unwrap_or_default())?;
    Ok(AgentLookup::ByPublicId(public_id))
}

/// GET /signed-url?agent_id=...
#[utoipa::path(
    get,
    path = "/api/conversations/signed-url",
    params(SignedUrlRequest),
    responses(
        (status = 200, description = "Signed WebSocket URL", body = SignedUrlResponse),
        (status = 400, description = "Missing agent_id", body = ErrorResponse),
        (status = 404, description = "Unknown agent ID", body = ErrorResponse),
        (status = 500, description = "Signed URL request failed", body = ErrorResponse)
    ),
    tag = "conversations"
)]
pub async fn get_signed_url(
    State(state): State<Arc<AppState>>,
    req: Result<Query<SignedUrlRequest>, QueryRejection>,
) -> Result<Json<SignedUrlResponse>, ApiError> {
    create_signed_url(&state, agent_lookup(req?.0)?).await
}

/// POST /signed-url {"agent_id": "..."}
#[utoipa::path(
    post,
    path = "/api/conversations/signed-url",
    request_body = SignedUrlRequest,
    responses(
        (status = 200, description = "Signed WebSocket URL", body = SignedUrlResponse),
        (status = 400, description = "Missing agent_id", body = ErrorResponse),
        (status = 404, description = "Unknown agent ID", body = ErrorResponse),
        (status = 500, description = "Signed URL request failed", body = ErrorResponse)
    ),
    tag = "conversations"
)]
pub async fn post_signed_url(
    State(state): State<Arc<AppState>>,
    req: Result<Json<SignedUrlRequest>, JsonRejection>,
) -> Result<Json<SignedUrlResponse>, ApiError> {
    create_signed_url(&state, agent_lookup(req?.0)?).await
}

/// GET /signed-url-by-public?public_id=...
#[utoipa::path(
    get,
    path = "/api/conversations/signed-url-by-public",
    params(PublicSignedUrlRequest),
    responses(
        (status = 200, description = "Signed WebSocket URL", body = SignedUrlResponse),
        (status = 400, description = "Missing public_id", body = ErrorResponse),
        (status = 404, description = "Unknown public ID", body = ErrorResponse),
        (status = 500, description = "Signed URL request failed", body = ErrorResponse)
    ),
    tag = "conversations"
)]
pub async fn get_signed_url_by_public(
    State(state): State<Arc<AppState>>,
    req: Result<Query<PublicSignedUrlRequest>, QueryRejection>,
) -> Result<Json<SignedUrlResponse>, ApiError> {
    create_signed_url(&state, public_lookup(req?.0)?).await
}

/// POST /signed-url-by-public {"public_id": "..."}
#[utoipa::path(
    post,
    path = "/api/conversations/signed-url-by-public",
    request_body = PublicSignedUrlRequest,
    responses(
        (status = 200, description = "Signed WebSocket URL", body = SignedUrlResponse),
        (status = 400, description = "Missing public_id", body = ErrorResponse),
        (status = 404, description = "Unknown public ID", body = ErrorResponse),
        (status = 500, description = "Signed URL request failed", body = ErrorResponse)
    ),
    tag = "conversations"
)]
pub async fn post_signed_url_by_public(
    State(state): State<Arc<AppState>>,
    req: Result<Json<PublicSignedUrlRequest>, JsonRejection>,
) -> Result<Json<SignedUrlResponse>, ApiError> {
    create_signed_url(&state, public_lookup(req?.0)?).await
}

/// agent_id 有效性检查，未找到时返回 valid = false
#[utoipa::path(
    get,
    path = "/api/conversations/validate-agent/{agent_id}",
    params(("agent_id" = String, Path, description = "ElevenLabs agent ID")),
    responses(
        (status = 200, description = "Validity report; unknown IDs give valid = false", body = AgentValidationResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    tag = "conversations"
)]
pub async fn validate_agent(
    State(state): State<Arc<AppState>>,
    agent_id: Result<Path<String>, PathRejection>,
) -> Result<Json<AgentValidationResponse>, ApiError> {
    let cmd = ValidateAgent {
        agent_id: AgentId::new(agent_id?.0)?,
    };

    let response = state.validate_agent_handler.handle(cmd).await?;

    Ok(Json(response.into()))
}
