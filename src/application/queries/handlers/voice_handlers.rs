//! Voice Directory Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{VoiceListFilter, VoiceRepositoryPort};
use crate::application::queries::{GetVoiceByAgent, GetVoiceStats, ListVoices, ResolvePublicId};
use crate::domain::voice::VoiceRecord;

// ============================================================================
// Response DTOs
// ============================================================================

/// 语音列表结果
#[derive(Debug, Clone)]
pub struct VoiceListResult {
    pub voices: Vec<VoiceRecord>,
    pub message: String,
}

/// 语音详情结果
#[derive(Debug, Clone)]
pub struct VoiceDetailResult {
    pub voice: VoiceRecord,
    pub message: String,
}

/// 统计结果
#[derive(Debug, Clone)]
pub struct VoiceStatsResult {
    pub total_voices: u64,
    pub voices_with_agent: u64,
    pub message: String,
}

/// public_id 解析结果
#[derive(Debug, Clone)]
pub struct PublicAgentResult {
    /// 真实的 agent ID
    pub agent_id: String,
    pub public_id: String,
    pub voice: VoiceRecord,
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListVoices Handler
pub struct ListVoicesHandler {
    voice_repo: Arc<dyn VoiceRepositoryPort>,
}

impl ListVoicesHandler {
    pub fn new(voice_repo: Arc<dyn VoiceRepositoryPort>) -> Self {
        Self { voice_repo }
    }

    pub async fn handle(&self, query: ListVoices) -> Result<VoiceListResult, ApplicationError> {
        let filter = VoiceListFilter {
            user_id: query.user_id.filter(|u| !u.is_empty()),
            limit: query.limit,
        };

        let voices: Vec<VoiceRecord> = self
            .voice_repo
            .list(&filter)
            .await?
            .into_iter()
            .filter(VoiceRecord::has_agent)
            .collect();

        tracing::debug!(
            user_id = ?filter.user_id,
            limit = filter.limit.get(),
            count = voices.len(),
            "Voices listed"
        );

        let message = format!("Found {} voice agents.", voices.len());
        Ok(VoiceListResult { voices, message })
    }
}

/// GetVoiceByAgent Handler
pub struct GetVoiceByAgentHandler {
    voice_repo: Arc<dyn VoiceRepositoryPort>,
}

impl GetVoiceByAgentHandler {
    pub fn new(voice_repo: Arc<dyn VoiceRepositoryPort>) -> Self {
        Self { voice_repo }
    }

    pub async fn handle(
        &self,
        query: GetVoiceByAgent,
    ) -> Result<VoiceDetailResult, ApplicationError> {
        let voice = self
            .voice_repo
            .find_by_agent_id(&query.agent_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Agent ID", query.agent_id.as_str()))?;

        Ok(VoiceDetailResult {
            voice,
            message: format!("Found voice for agent {}...", query.agent_id.short()),
        })
    }
}

/// GetVoiceStats Handler
pub struct GetVoiceStatsHandler {
    voice_repo: Arc<dyn VoiceRepositoryPort>,
}

impl GetVoiceStatsHandler {
    pub fn new(voice_repo: Arc<dyn VoiceRepositoryPort>) -> Self {
        Self { voice_repo }
    }

    pub async fn handle(
        &self,
        _query: GetVoiceStats,
    ) -> Result<VoiceStatsResult, ApplicationError> {
        let total_voices = self.voice_repo.count_all().await?;
        let voices_with_agent = self.voice_repo.count_with_agent().await?;

        // 两次计数之间可能有新记录写入
        let voices_with_agent = voices_with_agent.min(total_voices);

        Ok(VoiceStatsResult {
            total_voices,
            voices_with_agent,
            message: "Statistics for the voices table".to_string(),
        })
    }
}

/// ResolvePublicId Handler
pub struct ResolvePublicIdHandler {
    voice_repo: Arc<dyn VoiceRepositoryPort>,
}

impl ResolvePublicIdHandler {
    pub fn new(voice_repo: Arc<dyn VoiceRepositoryPort>) -> Self {
        Self { voice_repo }
    }

    pub async fn handle(
        &self,
        query: ResolvePublicId,
    ) -> Result<PublicAgentResult, ApplicationError> {
        let voice = self
            .voice_repo
            .find_by_public_id(&query.public_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Public ID", query.public_id.as_str()))?;

        // 没有注册 agent 的记录无法用于对话
        let agent_id = voice
            .agent_id
            .clone()
            .ok_or_else(|| ApplicationError::not_found("Public ID", query.public_id.as_str()))?;

        let message = format!("Resolved agent: {}", voice.display_name());

        Ok(PublicAgentResult {
            agent_id,
            public_id: query.public_id.as_str().to_string(),
            voice,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::{AgentId, PublicId, VoiceListLimit};
    use crate::infrastructure::memory::InMemoryVoiceRepository;
    use chrono::Utc;

    fn record(id: &str, agent_id: Option<&str>, nickname: Option<&str>) -> VoiceRecord {
        VoiceRecord {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            voice_id: format!("voice-{}", id),
            agent_id: agent_id.map(str::to_string),
            file_name: format!("{}.wav", id),
            nickname: nickname.map(str::to_string),
            public_id: Some(format!("pub-{}", id)),
            created_at: Utc::now(),
        }
    }

    fn repo() -> Arc<InMemoryVoiceRepository> {
        InMemoryVoiceRepository::with_records([
            record("1", Some("A1"), Some("Grandma")),
            record("2", None, None),
        ])
        .arc()
    }

    #[tokio::test]
    async fn test_list_excludes_records_without_agent() {
        let handler = ListVoicesHandler::new(repo());
        let result = handler
            .handle(ListVoices {
                user_id: Some(String::new()),
                limit: VoiceListLimit::default(),
            })
            .await
            .unwrap();

        assert_eq!(result.voices.len(), 1);
        assert!(result.voices.iter().all(|v| v.agent_id.is_some()));
        assert_eq!(result.message, "Found 1 voice agents.");
    }

    #[tokio::test]
    async fn test_get_by_agent_not_found() {
        let handler = GetVoiceByAgentHandler::new(repo());
        let err = handler
            .handle(GetVoiceByAgent {
                agent_id: AgentId::new("ZZZ").unwrap(),
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_stats() {
        let handler = GetVoiceStatsHandler::new(repo());
        let stats = handler.handle(GetVoiceStats).await.unwrap();
        assert_eq!(stats.total_voices, 2);
        assert_eq!(stats.voices_with_agent, 1);
    }

    #[tokio::test]
    async fn test_resolve_public_id() {
        let handler = ResolvePublicIdHandler::new(repo());
        let result = handler
            .handle(ResolvePublicId {
                public_id: PublicId::new("pub-1").unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(result.agent_id, "A1");
        assert_eq!(result.message, "Resolved agent: Grandma");
    }

    #[tokio::test]
    async fn test_resolve_public_id_without_agent() {
        let handler = ResolvePublicIdHandler::new(repo());
        let err = handler
            .handle(ResolvePublicId {
                public_id: PublicId::new("pub-2").unwrap(),
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
