//! ElevenLabs Adapter - Conversational AI Signed URL 客户端

mod fake_signed_url_provider;
mod signed_url_client;

pub use fake_signed_url_provider::FakeSignedUrlProvider;
pub use signed_url_client::*;
