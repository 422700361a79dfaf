//! Persistence Layer - 数据持久化
//!
//! voices 表托管在 Supabase，通过 PostgREST HTTP 接口只读访问

pub mod postgrest;

pub use self::postgrest::{PostgrestConfig, PostgrestVoiceRepository};
