//! VoiceChat API - 语音代理会话后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: voices 表记录与标识符值对象
//!
//! 应用层 (application/):
//! - Ports: 端口定义（VoiceRepository, SignedUrlProvider）
//! - Commands: 申请 Signed URL、校验 agent
//! - Queries: 列表、详情、统计、public_id 解析、健康检查
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Persistence: Supabase PostgREST
//! - Adapters: ElevenLabs Signed URL 客户端
//! - Memory: 内存 VoiceRepository（测试与本地开发）

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
