//! Conversation Command Handlers

use std::sync::Arc;

use crate::application::commands::{
    AgentLookup, CreateSignedUrl, CreateSignedUrlResponse, ValidateAgent, ValidateAgentResponse,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{SignedUrlProviderPort, VoiceRepositoryPort};
use crate::domain::voice::{AgentId, VoiceRecord};

/// 在 voices 表中定位 agent 记录
///
/// 返回记录中的 agent_id，public_id 命中但 agent_id 为空时视为未找到
async fn resolve_agent(
    voice_repo: &dyn VoiceRepositoryPort,
    lookup: &AgentLookup,
) -> Result<(AgentId, VoiceRecord), ApplicationError> {
    match lookup {
        AgentLookup::ByAgentId(agent_id) => {
            let record = voice_repo
                .find_by_agent_id(agent_id)
                .await?
                .ok_or_else(|| ApplicationError::not_found("Agent ID", agent_id.as_str()))?;
            Ok((agent_id.clone(), record))
        }
        AgentLookup::ByPublicId(public_id) => {
            let record = voice_repo
                .find_by_public_id(public_id)
                .await?
                .ok_or_else(|| ApplicationError::not_found("Public ID", public_id.as_str()))?;
            let agent_id = record
                .agent_id
                .as_deref()
                .and_then(|id| AgentId::new(id).ok())
                .ok_or_else(|| ApplicationError::not_found("Public ID", public_id.as_str()))?;
            Ok((agent_id, record))
        }
    }
}

/// CreateSignedUrl Handler - 校验 agent 后申请 Signed URL
pub struct CreateSignedUrlHandler {
    voice_repo: Arc<dyn VoiceRepositoryPort>,
    signed_url_provider: Arc<dyn SignedUrlProviderPort>,
}

impl CreateSignedUrlHandler {
    pub fn new(
        voice_repo: Arc<dyn VoiceRepositoryPort>,
        signed_url_provider: Arc<dyn SignedUrlProviderPort>,
    ) -> Self {
        Self {
            voice_repo,
            signed_url_provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSignedUrl,
    ) -> Result<CreateSignedUrlResponse, ApplicationError> {
        // 1. 记录不存在时直接返回，不调用外部 API
        let (agent_id, record) = resolve_agent(self.voice_repo.as_ref(), &cmd.target).await?;

        // 2. 申请 Signed URL
        let signed = self
            .signed_url_provider
            .get_signed_url(&agent_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    agent_id = %agent_id.short(),
                    error = %e,
                    "Signed URL request failed"
                );
                ApplicationError::from(e)
            })?;

        tracing::info!(agent_id = %agent_id.short(), "Signed URL created");

        let nickname = record
            .nickname
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("No nickname");
        let message = format!(
            "Conversation ready! Voice: {} ({})",
            record.file_name, nickname
        );

        Ok(CreateSignedUrlResponse {
            signed_url: signed.url,
            agent_id: agent_id.into_inner(),
            message,
        })
    }
}

/// ValidateAgent Handler - 只查询记录，不调用外部 API
pub struct ValidateAgentHandler {
    voice_repo: Arc<dyn VoiceRepositoryPort>,
}

impl ValidateAgentHandler {
    pub fn new(voice_repo: Arc<dyn VoiceRepositoryPort>) -> Self {
        Self { voice_repo }
    }

    pub async fn handle(
        &self,
        cmd: ValidateAgent,
    ) -> Result<ValidateAgentResponse, ApplicationError> {
        let lookup = AgentLookup::ByAgentId(cmd.agent_id);

        match resolve_agent(self.voice_repo.as_ref(), &lookup).await {
            Ok((agent_id, record)) => Ok(ValidateAgentResponse {
                valid: true,
                agent_id: Some(agent_id.into_inner()),
                public_id: record.public_id,
                file_name: Some(record.file_name),
                nickname: record.nickname,
                created_at: Some(record.created_at),
                message: "Valid agent ID.".to_string(),
            }),
            Err(e) if e.is_not_found() => Ok(ValidateAgentResponse {
                valid: false,
                message: e.to_string(),
                ..Default::default()
            }),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::PublicId;
    use crate::infrastructure::adapters::FakeSignedUrlProvider;
    use crate::infrastructure::memory::InMemoryVoiceRepository;
    use chrono::Utc;

    fn record(agent_id: Option<&str>, public_id: &str) -> VoiceRecord {
        VoiceRecord {
            id: public_id.to_string(),
            user_id: "user-1".to_string(),
            voice_id: "voice-1".to_string(),
            agent_id: agent_id.map(str::to_string),
            file_name: "mom_voice.wav".to_string(),
            nickname: None,
            public_id: Some(public_id.to_string()),
            created_at: Utc::now(),
        }
    }

    fn setup() -> (
        CreateSignedUrlHandler,
        Arc<FakeSignedUrlProvider>,
        Arc<InMemoryVoiceRepository>,
    ) {
        let repo = InMemoryVoiceRepository::with_records([
            record(Some("A1"), "pub-1"),
            record(None, "pub-orphan"),
        ])
        .arc();
        let provider = Arc::new(FakeSignedUrlProvider::new());
        let handler = CreateSignedUrlHandler::new(repo.clone(), provider.clone());
        (handler, provider, repo)
    }

    #[tokio::test]
    async fn test_signed_url_by_agent_id() {
        let (handler, provider, _) = setup();
        let cmd = CreateSignedUrl {
            target: AgentLookup::ByAgentId(AgentId::new("A1").unwrap()),
        };

        let response = handler.handle(cmd).await.unwrap();
        assert_eq!(response.agent_id, "A1");
        assert!(response.signed_url.contains("A1"));
        assert_eq!(
            response.message,
            "Conversation ready! Voice: mom_voice.wav (No nickname)"
        );
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_agent_skips_provider() {
        let (handler, provider, _) = setup();
        let cmd = CreateSignedUrl {
            target: AgentLookup::ByAgentId(AgentId::new("ZZZ").unwrap()),
        };

        let err = handler.handle(cmd).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_signed_url_by_public_id_uses_real_agent() {
        let (handler, _, _) = setup();
        let cmd = CreateSignedUrl {
            target: AgentLookup::ByPublicId(PublicId::new("pub-1").unwrap()),
        };

        let response = handler.handle(cmd).await.unwrap();
        assert_eq!(response.agent_id, "A1");
    }

    #[tokio::test]
    async fn test_public_id_without_agent_is_not_found() {
        let (handler, provider, _) = setup();
        let cmd = CreateSignedUrl {
            target: AgentLookup::ByPublicId(PublicId::new("pub-orphan").unwrap()),
        };

        assert!(handler.handle(cmd).await.unwrap_err().is_not_found());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_external_error() {
        let (handler, provider, _) = setup();
        provider.set_failing(true);
        let cmd = CreateSignedUrl {
            target: AgentLookup::ByAgentId(AgentId::new("A1").unwrap()),
        };

        let err = handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn test_validate_agent() {
        let (_, _, repo) = setup();
        let handler = ValidateAgentHandler::new(repo.clone());

        let ok = handler
            .handle(ValidateAgent {
                agent_id: AgentId::new("A1").unwrap(),
            })
            .await
            .unwrap();
        assert!(ok.valid);
        assert_eq!(ok.file_name.as_deref(), Some("mom_voice.wav"));

        let missing = handler
            .handle(ValidateAgent {
                agent_id: AgentId::new("ZZZ").unwrap(),
            })
            .await
            .unwrap();
        assert!(!missing.valid);
        assert!(missing.agent_id.is_none());
        assert_eq!(missing.message, "Agent ID 'ZZZ' not found");

        repo.set_unavailable(true);
        let err = handler
            .handle(ValidateAgent {
                agent_id: AgentId::new("A1").unwrap(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::RepositoryError(_)));
    }
}
