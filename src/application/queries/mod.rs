//! 应用层 - 查询（读操作）
//!
//! Voice Directory: 列表、详情、统计、public_id 解析、健康检查

mod voice_queries;

pub mod handlers;

pub use voice_queries::*;
