//! Conversation Commands - 对话准备相关命令
//!
//! 先在 voices 表中确认 agent，再向外部语音 API 申请 Signed URL

use chrono::{DateTime, Utc};

use crate::domain::voice::{AgentId, PublicId};

/// 定位 agent 记录的方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentLookup {
    ByAgentId(AgentId),
    ByPublicId(PublicId),
}

/// 申请 Signed URL 命令
#[derive(Debug, Clone)]
pub struct CreateSignedUrl {
    pub target: AgentLookup,
}

/// 申请 Signed URL 响应
#[derive(Debug, Clone)]
pub struct CreateSignedUrlResponse {
    pub signed_url: String,
    pub agent_id: String,
    pub message: String,
}

/// 校验 agent_id 命令
#[derive(Debug, Clone)]
pub struct ValidateAgent {
    pub agent_id: AgentId,
}

/// 校验结果
///
/// 记录不存在时 valid = false，其余字段为空
#[derive(Debug, Clone, Default)]
pub struct ValidateAgentResponse {
    pub valid: bool,
    pub agent_id: Option<String>,
    pub public_id: Option<String>,
    pub file_name: Option<String>,
    pub nickname: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub message: String,
}
