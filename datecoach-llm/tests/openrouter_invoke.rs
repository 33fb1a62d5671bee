use httpmock::prelude::*;
use serde_json::json;
use datecoach_core::{ChatModel, ChatRequest, CoachError, Message};
use datecoach_llm::OpenRouterClient;

fn client_for(server: &MockServer) -> OpenRouterClient {
    OpenRouterClient::builder()
        .api_key("test-key")
        .base_url(server.url("/api/v1"))
        .model("anthropic/claude-3.5-haiku")
        .referer("https://datingassistent.nl")
        .build()
        .expect("client")
}

fn request() -> ChatRequest {
    ChatRequest::new(
        "",
        vec![Message::system("Je bent een coach."), Message::user("Hoi")],
    )
    .with_max_tokens(250)
}

#[tokio::test]
async fn complete_maps_first_choice_and_usage() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/chat/completions")
            .header("authorization", "Bearer test-key")
            .header("http-referer", "https://datingassistent.nl")
            .header("x-title", "DatingAssistent")
            .body_contains("\"model\":\"anthropic/claude-3.5-haiku\"")
            .body_contains("\"max_tokens\":250")
            .body_contains("\"stream\":false");
        then.status(200).json_body(json!({
            "id": "gen-1",
            "model": "anthropic/claude-3.5-haiku",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Hallo!"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }));
    });

    let response = client_for(&server)
        .complete(request())
        .await
        .expect("complete");

    assert_eq!(response.content, "Hallo!");
    assert_eq!(response.model.as_deref(), Some("anthropic/claude-3.5-haiku"));
    assert_eq!(response.usage.expect("usage").total_tokens, 15);
    mock.assert();
}

#[tokio::test]
async fn explicit_model_overrides_default() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/chat/completions")
            .body_contains("\"model\":\"openai/gpt-4o-mini\"");
        then.status(200).json_body(json!({
            "choices": [{"message": {"content": "ok"}}]
        }));
    });

    let mut req = request();
    req.model = "openai/gpt-4o-mini".to_string();
    let response = client_for(&server).complete(req).await.expect("complete");

    assert_eq!(response.content, "ok");
    mock.assert();
}

#[tokio::test]
async fn provider_errors_surface_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/chat/completions");
        then.status(429).json_body(json!({
            "error": {"message": "Rate limit exceeded", "type": "rate_limit"}
        }));
    });

    let err = client_for(&server)
        .complete(request())
        .await
        .expect_err("429 should fail");

    match err {
        CoachError::LlmProvider(message) => {
            assert!(message.contains("429"));
            assert!(message.contains("Rate limit exceeded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/chat/completions");
        then.status(200).json_body(json!({"choices": []}));
    });

    let err = client_for(&server)
        .complete(request())
        .await
        .expect_err("no choices");

    assert!(matches!(err, CoachError::LlmProvider(_)));
}
