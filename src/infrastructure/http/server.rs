//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;

use axum::middleware;
use axum::Router;
use http::{HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::compression::predicate::{And, DefaultPredicate, Predicate, SizeAbove};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 小于该字节数的响应不压缩
const COMPRESSION_MIN_SIZE: u16 = 1000;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub compression: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        crate::config::ServerConfig::default().into()
    }
}

impl From<crate::config::ServerConfig> for ServerConfig {
    fn from(config: crate::config::ServerConfig) -> Self {
        Self {
            host: config.host,
            port: config.port,
            cors_origins: config.cors_origins,
            compression: config.compression,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// CORS 配置：仅允许白名单来源，携带凭证，请求头原样回显
    fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(AllowHeaders::mirror_request())
    }

    fn compression_layer(&self) -> CompressionLayer<And<DefaultPredicate, SizeAbove>> {
        CompressionLayer::new()
            .gzip(self.compression)
            .compress_when(DefaultPredicate::new().and(SizeAbove::new(COMPRESSION_MIN_SIZE)))
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 构建 Router（含全部中间件）
    pub fn router(&self) -> Router {
        create_routes()
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(self.config.compression_layer())
            .layer(self.config.cors_layer())
            .with_state(self.state.clone())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_from_app_config() {
        let app = crate::config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            cors_origins: vec!["http://example.com".to_string()],
            compression: false,
        };
        let config: ServerConfig = app.into();
        assert_eq!(config.addr(), "127.0.0.1:9000");
        assert_eq!(config.cors_origins, vec!["http://example.com".to_string()]);
        assert!(!config.compression);
    }

    #[test]
    fn test_default_matches_app_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert!(config.compression);
        assert!(config
            .cors_origins
            .contains(&"http://localhost:3000".to_string()));
    }
}
