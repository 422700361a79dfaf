//! ElevenLabs Signed URL Client - 调用 ElevenLabs Conversational AI API
//!
//! 实现 SignedUrlProviderPort trait
//!
//! 外部 API:
//! GET https://api.elevenlabs.io/v1/convai/conversation/get-signed-url?agent_id=...
//! Header: xi-api-key
//! Response: {"signed_url": "wss://..."}

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::application::ports::{SignedUrl, SignedUrlError, SignedUrlProviderPort};
use crate::domain::voice::AgentId;

/// ElevenLabs 响应体
#[derive(Debug, Deserialize)]
struct SignedUrlHttpResponse {
    signed_url: String,
}

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// API Key，为 None 时客户端处于降级状态
    pub api_key: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ElevenLabsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl ElevenLabsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// ElevenLabs Signed URL 客户端
///
/// HTTP 客户端在第一次调用时创建，之后在进程内复用
pub struct ElevenLabsClient {
    client: OnceCell<Client>,
    config: ElevenLabsClientConfig,
}

impl ElevenLabsClient {
    /// 创建客户端
    ///
    /// 缺少 API Key 时仍然成功，调用 get_signed_url 时才报错
    pub fn new(config: ElevenLabsClientConfig) -> Self {
        Self {
            client: OnceCell::new(),
            config,
        }
    }

    /// 获取 Signed URL 接口地址
    fn signed_url_endpoint(&self) -> String {
        format!(
            "{}/v1/convai/conversation/get-signed-url",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn http(&self) -> Result<&Client, SignedUrlError> {
        self.client
            .get_or_try_init(|| async {
                Client::builder()
                    .timeout(Duration::from_secs(self.config.timeout_secs))
                    .build()
                    .map_err(|e| SignedUrlError::NetworkError(e.to_string()))
            })
            .await
    }
}

#[async_trait]
impl SignedUrlProviderPort for ElevenLabsClient {
    async fn get_signed_url(&self, agent_id: &AgentId) -> Result<SignedUrl, SignedUrlError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(SignedUrlError::MissingCredentials)?;

        tracing::info!(agent_id = %agent_id.short(), "Requesting ElevenLabs signed URL");

        let response = self
            .http()
            .await?
            .get(self.signed_url_endpoint())
            .header("xi-api-key", api_key)
            .query(&[("agent_id", agent_id.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SignedUrlError::NetworkError(format!("Request timed out: {}", e))
                } else if e.is_connect() {
                    SignedUrlError::NetworkError(format!("Cannot connect to ElevenLabs: {}", e))
                } else {
                    SignedUrlError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SignedUrlError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }

        let body: SignedUrlHttpResponse = response
            .json()
            .await
            .map_err(|e| SignedUrlError::InvalidResponse(e.to_string()))?;

        if body.signed_url.is_empty() {
            return Err(SignedUrlError::InvalidResponse(
                "signed_url is empty".to_string(),
            ));
        }

        tracing::info!(agent_id = %agent_id.short(), "ElevenLabs signed URL received");

        Ok(SignedUrl {
            url: body.signed_url,
            agent_id: agent_id.clone(),
        })
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ElevenLabsClientConfig::default();
        assert_eq!(config.base_url, "https://api.elevenlabs.io");
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_builder() {
        let config = ElevenLabsClientConfig::new("http://example.com:9000/")
            .with_api_key("xi-test")
            .with_timeout(5);
        assert_eq!(config.api_key.as_deref(), Some("xi-test"));
        assert_eq!(config.timeout_secs, 5);

        let client = ElevenLabsClient::new(config);
        assert_eq!(
            client.signed_url_endpoint(),
            "http://example.com:9000/v1/convai/conversation/get-signed-url"
        );
        assert!(client.is_configured());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let client = ElevenLabsClient::new(ElevenLabsClientConfig::new("http://127.0.0.1:1"));
        let err = client
            .get_signed_url(&AgentId::new("A1").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, SignedUrlError::MissingCredentials));
        assert!(!client.is_configured());
    }
}
