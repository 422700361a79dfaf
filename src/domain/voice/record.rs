//! Voice Context - VoiceRecord 实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// voices 表中的一行
///
/// 记录由外部系统创建和修改，本服务只读。
/// agent_id / public_id 在表中允许为空，非空时各自唯一。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceRecord {
    pub id: String,
    pub user_id: String,
    pub voice_id: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    pub file_name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub public_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl VoiceRecord {
    pub fn has_agent(&self) -> bool {
        self.agent_id.is_some()
    }

    /// 昵称优先，其次文件名
    pub fn display_name(&self) -> &str {
        [self.nickname.as_deref(), Some(self.file_name.as_str())]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(nickname: Option<&str>) -> VoiceRecord {
        VoiceRecord {
            id: "1".to_string(),
            user_id: "user-1".to_string(),
            voice_id: "voice-1".to_string(),
            agent_id: Some("A1".to_string()),
            file_name: "sample.wav".to_string(),
            nickname: nickname.map(str::to_string),
            public_id: Some("pub-1".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_prefers_nickname() {
        assert_eq!(record(Some("Mom")).display_name(), "Mom");
        assert_eq!(record(None).display_name(), "sample.wav");
        assert_eq!(record(Some("")).display_name(), "sample.wav");

        let mut unnamed = record(None);
        unnamed.file_name.clear();
        assert_eq!(unnamed.display_name(), "Unknown");
    }

    #[test]
    fn test_deserialize_postgrest_row() {
        let json = r#"{
            "id": "0b8f2c1e-1111-2222-3333-444455556666",
            "user_id": "user-1",
            "voice_id": "voice-1",
            "agent_id": null,
            "file_name": "hello.mp3",
            "nickname": null,
            "public_id": "pub-1",
            "created_at": "2025-03-01T12:34:56.123456+00:00"
        }"#;
        let record: VoiceRecord = serde_json::from_str(json).unwrap();
        assert!(!record.has_agent());
        assert_eq!(record.public_id.as_deref(), Some("pub-1"));
        assert_eq!(record.created_at.to_rfc3339(), "2025-03-01T12:34:56.123456+00:00");
    }
}
