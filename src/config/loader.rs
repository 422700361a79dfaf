//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（`VOICECHAT_` 前缀）
//! 2. 旧版环境变量（`NEXT_PUBLIC_SUPABASE_URL` 等，仅在对应新变量未设置时生效）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{mask_secret, AppConfig};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "VOICECHAT";

/// 旧版环境变量 -> (配置键, 对应的新环境变量)
const LEGACY_ENV_VARS: &[(&str, &str, &str)] = &[
    (
        "NEXT_PUBLIC_SUPABASE_URL",
        "database.url",
        "VOICECHAT_DATABASE__URL",
    ),
    (
        "NEXT_PUBLIC_SUPABASE_ANON_KEY",
        "database.anon_key",
        "VOICECHAT_DATABASE__ANON_KEY",
    ),
    (
        "ELEVENLABS_API_KEY",
        "voice_api.api_key",
        "VOICECHAT_VOICE_API__API_KEY",
    ),
    ("HOST", "server.host", "VOICECHAT_SERVER__HOST"),
    ("PORT", "server.port", "VOICECHAT_SERVER__PORT"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `VOICECHAT_SERVER__PORT=8000`
/// - `VOICECHAT_DATABASE__URL=https://xyz.supabase.co`
/// - `VOICECHAT_DATABASE__ANON_KEY=...`
/// - `VOICECHAT_VOICE_API__API_KEY=...`
///
/// 同时兼容 `NEXT_PUBLIC_SUPABASE_URL`、`NEXT_PUBLIC_SUPABASE_ANON_KEY`、
/// `ELEVENLABS_API_KEY`、`HOST`、`PORT`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("server.compression", true)?
        .set_default("database.table", "voices")?
        .set_default("database.timeout_secs", 30)?
        .set_default("voice_api.base_url", "https://api.elevenlabs.io")?
        .set_default("voice_api.timeout_secs", 30)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 旧版环境变量
    for (key, value) in legacy_overrides(|name| std::env::var(name).ok()) {
        builder = builder.set_override(key, value)?;
    }

    // 4. 环境变量（最高优先级）
    // 例如: VOICECHAT_DATABASE__URL=https://xyz.supabase.co
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 收集已设置、且对应新变量未设置的旧版环境变量
fn legacy_overrides<F>(lookup: F) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    LEGACY_ENV_VARS
        .iter()
        .filter(|(_, _, modern)| lookup(modern).is_none())
        .filter_map(|(legacy, key, _)| lookup(legacy).map(|value| (*key, value)))
        .filter(|(_, value)| !value.is_empty())
        .collect()
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database URL is required (VOICECHAT_DATABASE__URL or NEXT_PUBLIC_SUPABASE_URL)"
                .to_string(),
        ));
    }

    if !config.database.url.starts_with("http://") && !config.database.url.starts_with("https://")
    {
        return Err(ConfigError::ValidationError(format!(
            "Database URL must start with http:// or https://: {}",
            config.database.url
        )));
    }

    if config.database.anon_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database anon key is required (VOICECHAT_DATABASE__ANON_KEY or NEXT_PUBLIC_SUPABASE_ANON_KEY)"
                .to_string(),
        ));
    }

    if config.database.table.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database table cannot be empty".to_string(),
        ));
    }

    if config.voice_api.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Voice API base URL cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("CORS Origins: {:?}", config.server.cors_origins);
    tracing::info!("Compression: {}", config.server.compression);
    tracing::info!("Database URL: {}", config.database.url);
    tracing::info!("Database Key: {}", mask_secret(&config.database.anon_key, 20));
    tracing::info!("Database Table: {}", config.database.table);
    tracing::info!("Voice API: {}", config.voice_api.base_url);
    match config.voice_api.api_key() {
        Some(key) => tracing::info!("Voice API Key: {}", mask_secret(key, 10)),
        None => tracing::warn!("Voice API Key: not set (signed URL requests will fail)"),
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
