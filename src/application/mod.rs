//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（VoiceRepository、SignedUrlProvider）
//! - commands: 对话准备（Signed URL 申请、agent 校验）
//! - queries: 语音目录查询及健康检查
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    AgentLookup, CreateSignedUrl, CreateSignedUrlResponse, ValidateAgent, ValidateAgentResponse,
    // Handlers
    handlers::{CreateSignedUrlHandler, ValidateAgentHandler},
};

pub use error::ApplicationError;

pub use ports::{
    RepositoryError, SignedUrl, SignedUrlError, SignedUrlProviderPort, VoiceListFilter,
    VoiceRepositoryPort,
};

pub use queries::{
    CheckHealth, GetVoiceByAgent, GetVoiceStats, ListVoices, ResolvePublicId,
    // Handlers
    handlers::{
        CheckHealthHandler, GetVoiceByAgentHandler, GetVoiceStatsHandler, HealthReport,
        ListVoicesHandler, PublicAgentResult, ResolvePublicIdHandler, VoiceDetailResult,
        VoiceListResult, VoiceStatsResult,
    },
};
