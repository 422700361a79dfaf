//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Agent ID is required")]
    EmptyAgentId,

    #[error("Public ID is required")]
    EmptyPublicId,

    #[error("limit must be between {min} and {max}, got {value}")]
    LimitOutOfRange { value: i64, min: u32, max: u32 },
}
