//! VoiceChat API - 语音代理会话后端
//!
//! - Domain: voice/
//! - Application: commands, queries, ports
//! - Infrastructure: http, persistence, adapters, memory

use std::sync::Arc;

use voicechat_api::application::SignedUrlProviderPort;
use voicechat_api::config::{load_config, print_config, AppConfig};
use voicechat_api::infrastructure::adapters::{ElevenLabsClient, ElevenLabsClientConfig};
use voicechat_api::infrastructure::http::{AppState, HttpServer, ServerConfig};
use voicechat_api::infrastructure::persistence::{PostgrestConfig, PostgrestVoiceRepository};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},voicechat_api={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 文件可选
    dotenvy::dotenv().ok();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("VoiceChat API v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 创建 Repository 适配器
    let db_config = PostgrestConfig::new(&config.database.url, &config.database.anon_key)
        .with_table(&config.database.table)
        .with_timeout(config.database.timeout_secs);
    let voice_repo = Arc::new(PostgrestVoiceRepository::new(db_config));

    // 创建 Signed URL 客户端，缺少 API Key 时降级启动
    let mut voice_api_config = ElevenLabsClientConfig::new(&config.voice_api.base_url)
        .with_timeout(config.voice_api.timeout_secs);
    if let Some(api_key) = config.voice_api.api_key() {
        voice_api_config = voice_api_config.with_api_key(api_key);
    }
    let signed_url_provider = Arc::new(ElevenLabsClient::new(voice_api_config));
    if !signed_url_provider.is_configured() {
        tracing::warn!("ElevenLabs API key is not configured, signed URL requests will fail");
    }

    // 创建 HTTP 服务器
    let server_config = ServerConfig::from(config.server.clone());
    let state = AppState::new(voice_repo, signed_url_provider);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
