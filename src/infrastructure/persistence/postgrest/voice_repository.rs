//! PostgREST Voice Repository
//!
//! GET {url}/rest/v1/{table}?select=*&agent_id=eq.X&limit=2
//! Headers: apikey / Authorization: Bearer <anon key>
//!
//! 计数使用 `Prefer: count=exact`，总数取自 Content-Range 头（如 `0-0/42`、`*/0`）

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::application::ports::{RepositoryError, VoiceListFilter, VoiceRepositoryPort};
use crate::domain::voice::{AgentId, PublicId, VoiceRecord};

/// PostgREST 连接配置
#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    /// Supabase 项目 URL
    pub url: String,
    /// 匿名 Key
    pub anon_key: String,
    /// 表名
    pub table: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl PostgrestConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            table: "voices".to_string(),
            timeout_secs: 30,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// 表的 REST 地址
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), self.table)
    }
}

/// 解析 Content-Range 头中的总数
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

/// PostgREST 语音仓储
///
/// HTTP 客户端在第一次请求时创建，之后在进程内复用
pub struct PostgrestVoiceRepository {
    client: OnceCell<Client>,
    config: PostgrestConfig,
}

impl PostgrestVoiceRepository {
    pub fn new(config: PostgrestConfig) -> Self {
        Self {
            client: OnceCell::new(),
            config,
        }
    }

    async fn http(&self) -> Result<&Client, RepositoryError> {
        if self.config.url.is_empty() || self.config.anon_key.is_empty() {
            return Err(RepositoryError::NotConfigured(
                "database URL and anon key are required".to_string(),
            ));
        }

        self.client
            .get_or_try_init(|| async {
                Client::builder()
                    .timeout(Duration::from_secs(self.config.timeout_secs))
                    .build()
                    .map_err(|e| RepositoryError::NetworkError(e.to_string()))
            })
            .await
    }

    async fn request(
        &self,
        params: &[(&str, String)],
    ) -> Result<RequestBuilder, RepositoryError> {
        Ok(self
            .http()
            .await?
            .get(self.config.table_url())
            .header("apikey", &self.config.anon_key)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.anon_key),
            )
            .header(header::ACCEPT, "application/json")
            .query(params))
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, RepositoryError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RepositoryError::NetworkError(format!("Request timed out: {}", e))
            } else if e.is_connect() {
                RepositoryError::NetworkError(format!("Cannot connect to database: {}", e))
            } else {
                RepositoryError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::DatabaseError(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        Ok(response)
    }

    async fn fetch_rows(
        &self,
        params: &[(&str, String)],
    ) -> Result<Vec<VoiceRecord>, RepositoryError> {
        let response = self.send(self.request(params).await?).await?;
        response
            .json::<Vec<VoiceRecord>>()
            .await
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))
    }

    /// 按唯一列查询，多取一行用于发现重复
    async fn find_unique(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<VoiceRecord>, RepositoryError> {
        let params = [
            ("select", "*".to_string()),
            (column, format!("eq.{}", value)),
            ("limit", "2".to_string()),
        ];

        let mut rows = self.fetch_rows(&params).await?;
        if rows.len() > 1 {
            tracing::warn!(column, value, "Unique lookup matched multiple voices");
            return Err(RepositoryError::Duplicate(format!(
                "multiple voices with {} = {}",
                column, value
            )));
        }
        Ok(rows.pop())
    }

    async fn count(&self, params: &[(&str, String)]) -> Result<u64, RepositoryError> {
        let request = self
            .request(params)
            .await?
            .header("Prefer", "count=exact");
        let response = self.send(request).await?;

        let range = response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                RepositoryError::SerializationError("missing Content-Range header".to_string())
            })?;

        parse_content_range_total(range).ok_or_else(|| {
            RepositoryError::SerializationError(format!("invalid Content-Range: {}", range))
        })
    }
}

#[async_trait]
impl VoiceRepositoryPort for PostgrestVoiceRepository {
    async fn find_by_agent_id(
        &self,
        agent_id: &AgentId,
    ) -> Result<Option<VoiceRecord>, RepositoryError> {
        self.find_unique("agent_id", agent_id.as_str()).await
    }

    async fn find_by_public_id(
        &self,
        public_id: &PublicId,
    ) -> Result<Option<VoiceRecord>, RepositoryError> {
        self.find_unique("public_id", public_id.as_str()).await
    }

    async fn list(&self, filter: &VoiceListFilter) -> Result<Vec<VoiceRecord>, RepositoryError> {
        let mut params = vec![
            ("select", "*".to_string()),
            ("agent_id", "not.is.null".to_string()),
        ];
        if let Some(user_id) = &filter.user_id {
            params.push(("user_id", format!("eq.{}", user_id)));
        }
        params.push(("order", "created_at.desc".to_string()));
        params.push(("limit", filter.limit.get().to_string()));

        self.fetch_rows(&params).await
    }

    async fn count_all(&self) -> Result<u64, RepositoryError> {
        self.count(&[("select", "id".to_string()), ("limit", "1".to_string())])
            .await
    }

    async fn count_with_agent(&self) -> Result<u64, RepositoryError> {
        self.count(&[
            ("select", "id".to_string()),
            ("agent_id", "not.is.null".to_string()),
            ("limit", "1".to_string()),
        ])
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url() {
        let config = PostgrestConfig::new("https://abc.supabase.co/", "anon");
        assert_eq!(config.table_url(), "https://abc.supabase.co/rest/v1/voices");

        let config = config.with_table("voices_staging");
        assert_eq!(
            config.table_url(),
            "https://abc.supabase.co/rest/v1/voices_staging"
        );
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_without_network() {
        let repo = PostgrestVoiceRepository::new(PostgrestConfig::new("", ""));
        let err = repo.count_all().await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotConfigured(_)));
    }

    #[test]
    fn test_parse_content_range() {
        assert_eq!(parse_content_range_total("0-0/42"), Some(42));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-24/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }
}
