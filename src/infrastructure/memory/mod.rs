//! Memory Layer - In-Memory Adapters
//!
//! VoiceRepositoryPort 的内存实现，用于本地运行和测试

mod voice_repository;

pub use voice_repository::InMemoryVoiceRepository;
