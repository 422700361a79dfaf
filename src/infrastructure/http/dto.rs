//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::{
    CreateSignedUrlResponse, PublicAgentResult, ValidateAgentResponse, VoiceDetailResult,
    VoiceListResult, VoiceStatsResult,
};
use crate::domain::voice::VoiceRecord;

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoiceResponse {
    pub id: String,
    pub user_id: String,
    pub voice_id: String,
    pub agent_id: Option<String>,
    pub file_name: String,
    pub nickname: Option<String>,
    pub public_id: Option<String>,
    pub created_at: String,
}

impl From<VoiceRecord> for VoiceResponse {
    fn from(record: VoiceRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            voice_id: record.voice_id,
            agent_id: record.agent_id,
            file_name: record.file_name,
            nickname: record.nickname,
            public_id: record.public_id,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListVoicesParams {
    /// 用户 ID，不传则查询全部
    pub user_id: Option<String>,
    /// 最大返回条数（1-100，默认 50）
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VoiceListResponse {
    pub voices: Vec<VoiceResponse>,
    pub total: usize,
    pub message: String,
}

impl From<VoiceListResult> for VoiceListResponse {
    fn from(result: VoiceListResult) -> Self {
        let voices: Vec<VoiceResponse> = result.voices.into_iter().map(Into::into).collect();
        Self {
            total: voices.len(),
            voices,
            message: result.message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VoiceDetailResponse {
    pub voice: VoiceResponse,
    pub message: String,
}

impl From<VoiceDetailResult> for VoiceDetailResponse {
    fn from(result: VoiceDetailResult) -> Self {
        Self {
            voice: result.voice.into(),
            message: result.message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub total_voices: u64,
    pub voices_with_agent: u64,
    pub message: String,
}

impl From<VoiceStatsResult> for StatsResponse {
    fn from(result: VoiceStatsResult) -> Self {
        Self {
            total_voices: result.total_voices,
            voices_with_agent: result.voices_with_agent,
            message: result.message,
        }
    }
}

/// public_id → agent_id 解析响应
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicAgentResponse {
    pub agent_id: String,
    pub public_id: String,
    pub nickname: Option<String>,
    pub file_name: Option<String>,
    pub voice_id: Option<String>,
    pub user_id: Option<String>,
    pub created_at: Option<String>,
    pub message: String,
}

impl From<PublicAgentResult> for PublicAgentResponse {
    fn from(result: PublicAgentResult) -> Self {
        let voice = result.voice;
        Self {
            agent_id: result.agent_id,
            public_id: result.public_id,
            nickname: voice.nickname,
            file_name: Some(voice.file_name),
            voice_id: Some(voice.voice_id),
            user_id: Some(voice.user_id),
            created_at: Some(voice.created_at.to_rfc3339()),
            message: result.message,
        }
    }
}

// ============================================================================
// Conversation DTOs
// ============================================================================

/// GET 查询参数或 POST JSON body
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SignedUrlRequest {
    /// ElevenLabs agent ID
    #[serde(default)]
    pub agent_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PublicSignedUrlRequest {
    /// 公开链接使用的标识
    #[serde(default)]
    pub public_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignedUrlResponse {
    /// WebSocket 连接用 URL
    pub signed_url: String,
    pub agent_id: String,
    pub message: String,
}

impl From<CreateSignedUrlResponse> for SignedUrlResponse {
    fn from(response: CreateSignedUrlResponse) -> Self {
        Self {
            signed_url: response.signed_url,
            agent_id: response.agent_id,
            message: response.message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AgentValidationResponse {
    pub valid: bool,
    pub agent_id: Option<String>,
    pub public_id: Option<String>,
    pub file_name: Option<String>,
    pub nickname: Option<String>,
    pub created_at: Option<String>,
    pub message: String,
}

impl From<ValidateAgentResponse> for AgentValidationResponse {
    fn from(response: ValidateAgentResponse) -> Self {
        Self {
            valid: response.valid,
            agent_id: response.agent_id,
            public_id: response.public_id,
            file_name: response.file_name,
            nickname: response.nickname,
            created_at: response.created_at.map(|t| t.to_rfc3339()),
            message: response.message,
        }
    }
}

// ============================================================================
// Service DTOs
// ============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub status: String,
}

/// 健康检查响应，数据库失败时也返回 200
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voices_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
