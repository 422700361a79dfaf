//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

use super::VoiceError;

/// 日志和提示信息中显示的 agent_id 前缀长度
const SHORT_ID_CHARS: usize = 15;

/// 外部语音 API 注册的 Agent 标识
///
/// 不变量: 不全是空白；原值保留，不做 trim
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(String);

impl AgentId {
    pub fn new(value: impl Into<String>) -> Result<Self, VoiceError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(VoiceError::EmptyAgentId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 截断后的 ID，用于日志
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(SHORT_ID_CHARS) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 公开链接中代替 AgentId 使用的标识
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicId(String);

impl PublicId {
    pub fn new(value: impl Into<String>) -> Result<Self, VoiceError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(VoiceError::EmptyPublicId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PublicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 列表查询的最大返回行数
///
/// 不变量: MIN <= value <= MAX
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceListLimit(u32);

impl VoiceListLimit {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;
    pub const DEFAULT: u32 = 50;

    pub fn new(value: i64) -> Result<Self, VoiceError> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(VoiceError::LimitOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value as u32))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for VoiceListLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_id_keeps_raw_value() {
        let id = AgentId::new("  agent_123  ").unwrap();
        assert_eq!(id.as_str(), "  agent_123  ");
    }

    #[test]
    fn test_agent_id_rejects_blank() {
        assert_eq!(AgentId::new(""), Err(VoiceError::EmptyAgentId));
        assert_eq!(AgentId::new("   "), Err(VoiceError::EmptyAgentId));
    }

    #[test]
    fn test_agent_id_short() {
        let id = AgentId::new("agent_0123456789abcdef").unwrap();
        assert_eq!(id.short(), "agent_012345678");

        let short = AgentId::new("A1").unwrap();
        assert_eq!(short.short(), "A1");
    }

    #[test]
    fn test_public_id_rejects_blank() {
        assert_eq!(PublicId::new(" "), Err(VoiceError::EmptyPublicId));
        assert_eq!(PublicId::new(" pub-1").unwrap().as_str(), " pub-1");
    }

    #[test]
    fn test_limit_bounds() {
        assert!(VoiceListLimit::new(0).is_err());
        assert!(VoiceListLimit::new(101).is_err());
        assert!(VoiceListLimit::new(-5).is_err());
        assert_eq!(VoiceListLimit::new(1).unwrap().get(), 1);
        assert_eq!(VoiceListLimit::new(100).unwrap().get(), 100);
    }

    #[test]
    fn test_limit_default() {
        assert_eq!(VoiceListLimit::default().get(), 50);
    }
}
