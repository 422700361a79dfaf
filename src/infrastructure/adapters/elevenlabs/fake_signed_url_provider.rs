//! Fake Signed URL Provider - 用于测试和本地开发
//!
//! 不调用外部 API，返回固定格式的 URL

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::application::ports::{SignedUrl, SignedUrlError, SignedUrlProviderPort};
use crate::domain::voice::AgentId;

const FAKE_BASE_URL: &str = "wss://fake.elevenlabs.local/v1/convai/conversation";

/// Fake Signed URL Provider
pub struct FakeSignedUrlProvider {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl FakeSignedUrlProvider {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// 已收到的请求次数（包括失败的请求）
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 为 true 时返回 ServiceError
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Default for FakeSignedUrlProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignedUrlProviderPort for FakeSignedUrlProvider {
    async fn get_signed_url(&self, agent_id: &AgentId) -> Result<SignedUrl, SignedUrlError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::debug!(
            agent_id = %agent_id.short(),
            call = n,
            "FakeSignedUrlProvider: returning fixed URL"
        );

        if self.failing.load(Ordering::SeqCst) {
            return Err(SignedUrlError::ServiceError {
                status: 503,
                body: "fake provider is failing".to_string(),
            });
        }

        Ok(SignedUrl {
            url: format!(
                "{}?agent_id={}&conversation_signature=fake-{}",
                FAKE_BASE_URL, agent_id, n
            ),
            agent_id: agent_id.clone(),
        })
    }
}
