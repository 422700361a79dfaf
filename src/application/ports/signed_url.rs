//! Signed URL Port - 外部语音 API 抽象
//!
//! 为实时语音会话申请有时效的 WebSocket URL，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::AgentId;

/// Signed URL 错误
#[derive(Debug, Error)]
pub enum SignedUrlError {
    #[error("Voice API key is not configured")]
    MissingCredentials,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Service error: HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 申请到的 Signed URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    /// WebSocket 连接用 URL
    pub url: String,
    /// 申请时使用的 agent ID
    pub agent_id: AgentId,
}

/// Signed URL Provider Port
///
/// 单次网络调用，不重试，不校验 URL 的有效期
#[async_trait]
pub trait SignedUrlProviderPort: Send + Sync {
    async fn get_signed_url(&self, agent_id: &AgentId) -> Result<SignedUrl, SignedUrlError>;

    /// 是否配置了调用所需的凭证
    fn is_configured(&self) -> bool {
        true
    }
}
