//! In-Memory Voice Repository Implementation
//!
//! 与 PostgREST 实现语义一致：唯一键命中多行时返回 Duplicate

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::application::ports::{RepositoryError, VoiceListFilter, VoiceRepositoryPort};
use crate::domain::voice::{AgentId, PublicId, VoiceRecord};

/// 内存语音仓储
pub struct InMemoryVoiceRepository {
    /// record id -> VoiceRecord
    records: DashMap<String, VoiceRecord>,
    /// 为 true 时所有操作返回 DatabaseError
    unavailable: AtomicBool,
}

impl InMemoryVoiceRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn with_records(records: impl IntoIterator<Item = VoiceRecord>) -> Self {
        let repo = Self::new();
        for record in records {
            repo.insert(record);
        }
        repo
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn insert(&self, record: VoiceRecord) {
        self.records.insert(record.id.clone(), record);
    }

    /// 模拟数据库不可用
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::DatabaseError(
                "database is unavailable".to_string(),
            ));
        }
        Ok(())
    }

    fn find_unique<F>(
        &self,
        key: &str,
        value: &str,
        pred: F,
    ) -> Result<Option<VoiceRecord>, RepositoryError>
    where
        F: Fn(&VoiceRecord) -> bool,
    {
        self.check_available()?;

        let mut matches = self
            .records
            .iter()
            .filter(|e| pred(e.value()))
            .map(|e| e.value().clone());

        let first = matches.next();
        if matches.next().is_some() {
            return Err(RepositoryError::Duplicate(format!(
                "multiple voices with {} = {}",
                key, value
            )));
        }
        Ok(first)
    }
}

impl Default for InMemoryVoiceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoiceRepositoryPort for InMemoryVoiceRepository {
    async fn find_by_agent_id(
        &self,
        agent_id: &AgentId,
    ) -> Result<Option<VoiceRecord>, RepositoryError> {
        self.find_unique("agent_id", agent_id.as_str(), |r| {
            r.agent_id.as_deref() == Some(agent_id.as_str())
        })
    }

    async fn find_by_public_id(
        &self,
        public_id: &PublicId,
    ) -> Result<Option<VoiceRecord>, RepositoryError> {
        self.find_unique("public_id", public_id.as_str(), |r| {
            r.public_id.as_deref() == Some(public_id.as_str())
        })
    }

    async fn list(&self, filter: &VoiceListFilter) -> Result<Vec<VoiceRecord>, RepositoryError> {
        self.check_available()?;

        let mut voices: Vec<VoiceRecord> = self
            .records
            .iter()
            .filter(|e| e.value().has_agent())
            .filter(|e| match &filter.user_id {
                Some(user_id) => &e.value().user_id == user_id,
                None => true,
            })
            .map(|e| e.value().clone())
            .collect();

        voices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        voices.truncate(filter.limit.get() as usize);

        Ok(voices)
    }

    async fn count_all(&self) -> Result<u64, RepositoryError> {
        self.check_available()?;
        Ok(self.records.len() as u64)
    }

    async fn count_with_agent(&self) -> Result<u64, RepositoryError> {
        self.check_available()?;
        Ok(self.records.iter().filter(|e| e.value().has_agent()).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::VoiceListLimit;
    use chrono::{Duration, Utc};

    fn record(id: &str, user_id: &str, agent_id: Option<&str>, age_minutes: i64) -> VoiceRecord {
        VoiceRecord {
            id: id.to_string(),
            user_id: user_id.to_string(),
            voice_id: format!("voice-{}", id),
            agent_id: agent_id.map(str::to_string),
            file_name: format!("{}.wav", id),
            nickname: None,
            public_id: Some(format!("pub-{}", id)),
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[tokio::test]
    async fn test_list_filters_and_orders() {
        let repo = InMemoryVoiceRepository::with_records([
            record("1", "u1", Some("A1"), 30),
            record("2", "u1", None, 20),
            record("3", "u2", Some("A3"), 10),
            record("4", "u1", Some("A4"), 5),
        ]);

        let all = repo.list(&VoiceListFilter::default()).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "3", "1"]);

        let filter = VoiceListFilter {
            user_id: Some("u1".to_string()),
            limit: VoiceListLimit::new(1).unwrap(),
        };
        let u1 = repo.list(&filter).await.unwrap();
        assert_eq!(u1.len(), 1);
        assert_eq!(u1[0].id, "4");
    }

    #[tokio::test]
    async fn test_find_by_agent_id() {
        let repo = InMemoryVoiceRepository::with_records([record("1", "u1", Some("A1"), 0)]);

        let found = repo
            .find_by_agent_id(&AgentId::new("A1").unwrap())
            .await
            .unwrap();
        assert_eq!(found.map(|r| r.id), Some("1".to_string()));

        let missing = repo
            .find_by_agent_id(&AgentId::new("ZZZ").unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_agent_id() {
        let repo = InMemoryVoiceRepository::with_records([
            record("1", "u1", Some("A1"), 0),
            record("2", "u2", Some("A1"), 0),
        ]);

        let result = repo.find_by_agent_id(&AgentId::new("A1").unwrap()).await;
        assert!(matches!(result, Err(RepositoryError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_counts() {
        let repo = InMemoryVoiceRepository::with_records([
            record("1", "u1", Some("A1"), 0),
            record("2", "u1", None, 0),
        ]);
        assert_eq!(repo.count_all().await.unwrap(), 2);
        assert_eq!(repo.count_with_agent().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unavailable() {
        let repo = InMemoryVoiceRepository::new();
        repo.set_unavailable(true);
        assert!(matches!(
            repo.count_all().await,
            Err(RepositoryError::DatabaseError(_))
        ));
    }
}
