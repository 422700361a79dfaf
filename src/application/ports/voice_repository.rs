//! Repository Ports - 出站端口
//!
//! voices 表的只读访问接口
//! 具体实现在 infrastructure 层（PostgREST、内存）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::{AgentId, PublicId, VoiceListLimit, VoiceRecord};

/// Repository 错误
///
/// "未找到" 不是错误，由 `Ok(None)` 表示
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Repository not configured: {0}")]
    NotConfigured(String),
}

/// 列表查询条件
#[derive(Debug, Clone, Default)]
pub struct VoiceListFilter {
    /// 为 None 时查询全部用户
    pub user_id: Option<String>,
    pub limit: VoiceListLimit,
}

/// Voice Repository Port
#[async_trait]
pub trait VoiceRepositoryPort: Send + Sync {
    /// 根据 agent_id 查找
    async fn find_by_agent_id(&self, agent_id: &AgentId)
        -> Result<Option<VoiceRecord>, RepositoryError>;

    /// 根据 public_id 查找
    async fn find_by_public_id(
        &self,
        public_id: &PublicId,
    ) -> Result<Option<VoiceRecord>, RepositoryError>;

    /// 列出 agent_id 非空的记录，按 created_at 降序
    async fn list(&self, filter: &VoiceListFilter) -> Result<Vec<VoiceRecord>, RepositoryError>;

    /// 全部记录数
    async fn count_all(&self) -> Result<u64, RepositoryError>;

    /// agent_id 非空的记录数
    async fn count_with_agent(&self) -> Result<u64, RepositoryError>;
}
