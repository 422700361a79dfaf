//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod signed_url;
mod voice_repository;

pub use signed_url::{SignedUrl, SignedUrlError, SignedUrlProviderPort};
pub use voice_repository::{RepositoryError, VoiceListFilter, VoiceRepositoryPort};
