//! HTTP contract tests for the OpenAI-compatible backend.

use scribe_agent::backend::{self, LlmError};
use scribe_agent::{CompletionOptions, CompletionService, Message, ProviderConfig, ServiceError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ProviderConfig {
    ProviderConfig::openai_compatible("gsk_test")
        .with_base_url(format!("{}/openai/v1", server.uri()))
        .with_model("openai/gpt-oss-20b")
}

fn chat_reply(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ],
        "usage": {"prompt_tokens": 12, "completion_tokens": 4}
    })
}

#[tokio::test]
async fn test_sends_messages_options_and_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer gsk_test"))
        .and(body_partial_json(json!({
            "model": "openai/gpt-oss-20b",
            "messages": [
                {"role": "system", "content": "Extract entities."},
                {"role": "user", "content": "Aspirin daily"}
            ],
            "max_tokens": 1600,
            "response_format": {"type": "json_object"},
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(r#"{"medications":["aspirin"]}"#)))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend::from_config(&config_for(&server)).unwrap();
    let result = backend
        .complete(
            &[Message::system("Extract entities."), Message::user("Aspirin daily")],
            &CompletionOptions::json().with_max_tokens(1600),
        )
        .await
        .unwrap();

    assert_eq!(result.text, r#"{"medications":["aspirin"]}"#);
    let raw = result.raw.expect("raw payload kept");
    assert_eq!(raw["usage"]["prompt_tokens"], 12);
}

#[tokio::test]
async fn test_api_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let service = CompletionService::from_config(&config_for(&server)).unwrap();
    let err = service
        .complete("sys", "usr", &CompletionOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_upstream());
    match err {
        ServiceError::Backend(LlmError::RequestFailed { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let backend = backend::from_config(&config_for(&server)).unwrap();
    let err = backend
        .complete(&[Message::user("hi")], &CompletionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::RateLimited(_)));
}

#[tokio::test]
async fn test_empty_choices_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let backend = backend::from_config(&config_for(&server)).unwrap();
    let err = backend
        .complete(&[Message::user("hi")], &CompletionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Parse(_)));
}

#[tokio::test]
async fn test_null_content_becomes_empty_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        })))
        .mount(&server)
        .await;

    let backend = backend::from_config(&config_for(&server)).unwrap();
    let result = backend
        .complete(&[Message::user("hi")], &CompletionOptions::default())
        .await
        .unwrap();

    assert_eq!(result.text, "");
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Nothing listens on port 9 locally
    let config = ProviderConfig::openai_compatible("gsk_test").with_base_url("http://127.0.0.1:9/v1");
    let backend = backend::from_config(&config).unwrap();

    let err = backend
        .complete(&[Message::user("hi")], &CompletionOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Network(_)));
}
