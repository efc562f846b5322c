use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn candidate_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ], "role": "model" } }
        ]
    })
}

#[tokio::test]
async fn generate_returns_first_candidate_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [ { "parts": [ { "text": "analyze this" } ] } ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("the analysis")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url("test-key", "gemini-2.5-flash", 5, &server.uri())
        .expect("client");
    let text = client.generate("analyze this", None).await.unwrap();
    assert_eq!(text, "the analysis");
}

#[tokio::test]
async fn generate_attaches_inline_video() {
    let server = MockServer::start().await;

    // base64 of b"vid" is "dmlk"
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(body_partial_json(serde_json::json!({
            "contents": [ { "parts": [
                { "inlineData": { "mimeType": "video/mp4", "data": "dmlk" } },
                { "text": "analyze this" }
            ] } ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url("test-key", "gemini-2.5-flash", 5, &server.uri())
        .expect("client");
    let video = VideoPart::mp4(b"vid".to_vec());
    let text = client.generate("analyze this", Some(&video)).await.unwrap();
    assert_eq!(text, "ok");
}

#[tokio::test]
async fn api_error_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url("test-key", "gemini-2.5-flash", 5, &server.uri())
        .expect("client");
    let err = client.generate("x", None).await.unwrap_err();
    assert!(matches!(err, AnalysisError::Api { status: 429, .. }));
}

#[tokio::test]
async fn empty_candidate_list_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
        )
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url("test-key", "gemini-2.5-flash", 5, &server.uri())
        .expect("client");
    let err = client.generate("x", None).await.unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyResponse));
}
