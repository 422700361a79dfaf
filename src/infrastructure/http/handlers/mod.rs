//! HTTP Handlers

mod conversation;
mod root;
mod voice;

pub use conversation::*;
pub use root::*;
pub use voice::*;
