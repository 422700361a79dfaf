//! 应用层 - 命令
//!
//! Conversation Setup: 校验 agent 后申请 Signed URL

mod conversation_commands;

pub mod handlers;

pub use conversation_commands::*;
