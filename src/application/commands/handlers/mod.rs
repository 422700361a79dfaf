//! Command Handlers 实现

mod conversation_handlers;

pub use conversation_handlers::*;
