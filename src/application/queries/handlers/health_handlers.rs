//! Health Query Handler

use std::sync::Arc;

use crate::application::ports::VoiceRepositoryPort;
use crate::application::queries::CheckHealth;

/// 健康检查结果
///
/// 数据库失败不作为错误返回，而是报告为 Unhealthy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthReport {
    Healthy { voices_count: u64 },
    Unhealthy { error: String },
}

/// CheckHealth Handler
pub struct CheckHealthHandler {
    voice_repo: Arc<dyn VoiceRepositoryPort>,
}

impl CheckHealthHandler {
    pub fn new(voice_repo: Arc<dyn VoiceRepositoryPort>) -> Self {
        Self { voice_repo }
    }

    pub async fn handle(&self, _query: CheckHealth) -> HealthReport {
        match self.voice_repo.count_all().await {
            Ok(voices_count) => HealthReport::Healthy { voices_count },
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                HealthReport::Unhealthy {
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryVoiceRepository;

    #[tokio::test]
    async fn test_healthy_and_unhealthy() {
        let repo = InMemoryVoiceRepository::new().arc();
        let handler = CheckHealthHandler::new(repo.clone());

        assert_eq!(
            handler.handle(CheckHealth).await,
            HealthReport::Healthy { voices_count: 0 }
        );

        repo.set_unavailable(true);
        assert!(matches!(
            handler.handle(CheckHealth).await,
            HealthReport::Unhealthy { .. }
        ));
    }
}
