// ABOUTME: HTTP contract tests for the Gemini provider against a mock server
// ABOUTME: Checks the endpoint, key header, structured-output config, and error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use football_coach::config::CoachConfig;
use football_coach::errors::ErrorCode;
use football_coach::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-2.5-flash:generateContent";

fn provider_for(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new("test-key").with_base_url(format!("{}/", server.uri()))
}

fn text_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 12,
            "candidatesTokenCount": 34,
            "totalTokenCount": 46
        }
    })
}

// ============================================================================
// Successful Requests
// ============================================================================

#[tokio::test]
async fn test_plain_request_hits_generate_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "Genera un plan" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Plan listo")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = ChatRequest::new(vec![ChatMessage::user("Genera un plan")]);
    let response = provider.complete(&request).await.unwrap();

    assert_eq!(response.content, "Plan listo");
    assert_eq!(response.model, "gemini-2.5-flash");
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(response.total_tokens(), 46);
    assert_eq!(response.usage.unwrap().prompt_tokens, 12);

    let received = server.received_requests().await.unwrap();
    assert!(received[0].url.query().is_none());
}

#[tokio::test]
async fn test_schema_request_sends_json_generation_config() {
    let server = MockServer::start().await;
    let schema = json!({ "type": "OBJECT", "properties": { "diagrams": { "type": "ARRAY" } } });

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "generation_config": {
                "response_mime_type": "application/json",
                "response_schema": schema
            }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response(r#"{"diagrams":[]}"#)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = ChatRequest::new(vec![ChatMessage::user("Diagramas")]).with_json_schema(schema);
    let response = provider.complete(&request).await.unwrap();

    assert_eq!(response.content, r#"{"diagrams":[]}"#);
}

#[tokio::test]
async fn test_request_model_overrides_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = ChatRequest::new(vec![ChatMessage::user("hola")]).with_model("gemini-2.5-pro");
    let response = provider.complete(&request).await.unwrap();

    assert_eq!(response.model, "gemini-2.5-pro");
}

#[tokio::test]
async fn test_multi_part_answers_are_joined() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Entrenamiento " }, { "text": "completo" }] }
            }]
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = ChatRequest::new(vec![ChatMessage::user("plan")]);
    let response = provider.complete(&request).await.unwrap();
    assert_eq!(response.content, "Entrenamiento completo");
    assert!(response.usage.is_none());
    assert_eq!(response.total_tokens(), 0);
}

// ============================================================================
// Error Mapping
// ============================================================================

#[tokio::test]
async fn test_rate_limit_maps_to_quota_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "code": 429,
                "message": "Quota exceeded. Please retry in 6.406453963s.",
                "status": "RESOURCE_EXHAUSTED"
            }
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider
        .complete(&ChatRequest::new(vec![ChatMessage::user("plan")]))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalRateLimited);
    assert!(err.message.contains("7 seconds"));
}

#[tokio::test]
async fn test_rejected_key_maps_to_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" }
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&ChatRequest::new(vec![ChatMessage::user("plan")]))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
    assert!(err.message.contains("API key not valid"));
}

#[tokio::test]
async fn test_server_error_and_empty_candidates_are_service_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let request = ChatRequest::new(vec![ChatMessage::user("plan")]);

    let err = provider.complete(&request).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(err.message.contains("500"));

    let err = provider.complete(&request).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_from_config_requires_api_key() {
    let config = CoachConfig::from_lookup(|_| None);
    let err = GeminiProvider::from_config(&config).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissing);
}

#[tokio::test]
async fn test_from_config_uses_base_url_and_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "from-env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let config = CoachConfig::from_lookup(|key| match key {
        "API_KEY" => Some("from-env".to_owned()),
        "COACH_LLM_MODEL" => Some("gemini-2.0-flash".to_owned()),
        "GEMINI_API_BASE_URL" => Some(uri.clone()),
        _ => None,
    });

    let provider = GeminiProvider::from_config(&config).unwrap();
    assert_eq!(provider.default_model(), "gemini-2.0-flash");

    provider
        .complete(&ChatRequest::new(vec![ChatMessage::user("hola")]))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_health_check_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": [] })))
        .mount(&server)
        .await;

    assert!(provider_for(&server).health_check().await.unwrap());
}

// ============================================================================
// Secret Handling
// ============================================================================

#[tokio::test]
async fn test_transport_error_does_not_leak_api_key() {
    let provider = GeminiProvider::new("SECRETKEY123").with_base_url("http://127.0.0.1:1");
    let request = ChatRequest::new(vec![ChatMessage::user("Genera un plan")]);

    let err = provider.complete(&request).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(!err.message.contains("SECRETKEY123"));
    assert!(!err.to_string().contains("SECRETKEY123"));
    assert!(!format!("{err:?}").contains("SECRETKEY123"));

    let err = provider.health_check().await.unwrap_err();
    assert!(!err.to_string().contains("SECRETKEY123"));
}
