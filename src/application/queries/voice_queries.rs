//! Voice Directory Queries

use crate::domain::voice::{AgentId, PublicId, VoiceListLimit};

/// 列出语音代理
#[derive(Debug, Clone, Default)]
pub struct ListVoices {
    pub user_id: Option<String>,
    pub limit: VoiceListLimit,
}

/// 根据 agent_id 获取语音详情
#[derive(Debug, Clone)]
pub struct GetVoiceByAgent {
    pub agent_id: AgentId,
}

/// voices 表统计
#[derive(Debug, Clone)]
pub struct GetVoiceStats;

/// public_id → 完整记录
#[derive(Debug, Clone)]
pub struct ResolvePublicId {
    pub public_id: PublicId,
}

/// 数据库连通性检查
#[derive(Debug, Clone)]
pub struct CheckHealth;
