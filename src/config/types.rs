//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库（Supabase）配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 外部语音 API（ElevenLabs）配置
    #[serde(default)]
    pub voice_api: VoiceApiConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 允许跨域的来源
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// 是否启用 gzip 压缩
    #[serde(default = "default_compression")]
    pub compression: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
        "http://localhost:3001".to_string(),
        "http://127.0.0.1:3001".to_string(),
    ]
}

fn default_compression() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            compression: default_compression(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Supabase 项目 URL
    #[serde(default)]
    pub url: String,

    /// 匿名 Key
    #[serde(default)]
    pub anon_key: String,

    /// 语音记录表名
    #[serde(default = "default_table")]
    pub table: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_table() -> String {
    "voices".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            table: default_table(),
            timeout_secs: default_timeout(),
        }
    }
}

/// 外部语音 API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceApiConfig {
    /// API Key，未设置时服务以降级模式启动
    #[serde(default)]
    pub api_key: Option<String>,

    /// API 基础 URL
    #[serde(default = "default_voice_api_url")]
    pub base_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_voice_api_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

impl Default for VoiceApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_voice_api_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl VoiceApiConfig {
    /// 空字符串视为未配置
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// 只显示前几个字符，用于日志
pub fn mask_secret(secret: &str, visible: usize) -> String {
    let prefix: String = secret.chars().take(visible).collect();
    if prefix.len() == secret.len() {
        "*".repeat(secret.chars().count())
    } else {
        format!("{}...", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.cors_origins.len(), 4);
        assert_eq!(config.database.table, "voices");
        assert_eq!(config.voice_api.base_url, "https://api.elevenlabs.io");
        assert!(config.voice_api.api_key.is_none());
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let config = VoiceApiConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("sk_1234567890abcdef", 10), "sk_1234567...");
        assert_eq!(mask_secret("short", 10), "*****");
    }
}
