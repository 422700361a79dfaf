//! ElevenLabs Signed URL 客户端测试（wiremock 模拟 API）

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voicechat_api::application::{SignedUrlError, SignedUrlProviderPort};
use voicechat_api::domain::voice::AgentId;
use voicechat_api::infrastructure::adapters::{ElevenLabsClient, ElevenLabsClientConfig};

const SIGNED_URL_PATH: &str = "/v1/convai/conversation/get-signed-url";

fn client(server: &MockServer) -> ElevenLabsClient {
    ElevenLabsClient::new(
        ElevenLabsClientConfig::new(server.uri())
            .with_api_key("xi-test")
            .with_timeout(5),
    )
}

#[tokio::test]
async fn returns_signed_url_for_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SIGNED_URL_PATH))
        .and(query_param("agent_id", "A1"))
        .and(header("xi-api-key", "xi-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "signed_url": "wss://api.elevenlabs.io/v1/convai/conversation?agent_id=A1&conversation_signature=abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let signed = client(&server)
        .get_signed_url(&AgentId::new("A1").unwrap())
        .await
        .unwrap();

    assert!(signed.url.starts_with("wss://"));
    assert_eq!(signed.agent_id.as_str(), "A1");
}

#[tokio::test]
async fn service_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SIGNED_URL_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string("agent not found"))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_signed_url(&AgentId::new("A1").unwrap())
        .await
        .unwrap_err();

    match err {
        SignedUrlError::ServiceError { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "agent not found");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn missing_signed_url_field_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SIGNED_URL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": "x" })))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_signed_url(&AgentId::new("A1").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, SignedUrlError::InvalidResponse(_)));
}

#[tokio::test]
async fn missing_api_key_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ElevenLabsClient::new(ElevenLabsClientConfig::new(server.uri()));
    assert!(!client.is_configured());

    let err = client
        .get_signed_url(&AgentId::new("A1").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, SignedUrlError::MissingCredentials));
}
