//! PostgREST Persistence - Supabase REST 接口实现

mod voice_repository;

pub use voice_repository::*;
