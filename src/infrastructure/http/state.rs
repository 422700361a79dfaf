//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateSignedUrlHandler, ValidateAgentHandler,
    // Query handlers
    CheckHealthHandler, GetVoiceByAgentHandler, GetVoiceStatsHandler, ListVoicesHandler,
    ResolvePublicIdHandler,
    // Ports
    SignedUrlProviderPort, VoiceRepositoryPort,
};

/// 应用状态
///
/// 两个外部客户端句柄在进程内只创建一次，由各 handler 共享
pub struct AppState {
    // ========== Command Handlers ==========
    pub create_signed_url_handler: CreateSignedUrlHandler,
    pub validate_agent_handler: ValidateAgentHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
    pub get_voice_by_agent_handler: GetVoiceByAgentHandler,
    pub get_voice_stats_handler: GetVoiceStatsHandler,
    pub resolve_public_id_handler: ResolvePublicIdHandler,
    pub check_health_handler: CheckHealthHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        voice_repo: Arc<dyn VoiceRepositoryPort>,
        signed_url_provider: Arc<dyn SignedUrlProviderPort>,
    ) -> Self {
        Self {
            // Command handlers
            create_signed_url_handler: CreateSignedUrlHandler::new(
                voice_repo.clone(),
                signed_url_provider,
            ),
            validate_agent_handler: ValidateAgentHandler::new(voice_repo.clone()),

            // Query handlers
            list_voices_handler: ListVoicesHandler::new(voice_repo.clone()),
            get_voice_by_agent_handler: GetVoiceByAgentHandler::new(voice_repo.clone()),
            get_voice_stats_handler: GetVoiceStatsHandler::new(voice_repo.clone()),
            resolve_public_id_handler: ResolvePublicIdHandler::new(voice_repo.clone()),
            check_health_handler: CheckHealthHandler::new(voice_repo),
        }
    }
}
