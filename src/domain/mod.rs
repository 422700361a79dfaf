//! Domain Layer - 领域层
//!
//! Voice Context: 语音代理记录（voices 表）及其标识符

pub mod voice;
