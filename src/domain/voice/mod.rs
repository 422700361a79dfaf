//! Voice Context - 语音代理限界上下文
//!
//! 职责:
//! - VoiceRecord 实体（voices 表的一行）
//! - AgentId / PublicId 标识符校验
//! - 列表查询的 limit 边界

mod errors;
mod record;
mod value_objects;

pub use errors::VoiceError;
pub use record::VoiceRecord;
pub use value_objects::{AgentId, PublicId, VoiceListLimit};
