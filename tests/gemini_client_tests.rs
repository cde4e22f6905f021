//! HTTP-level tests for the Gemini client against a local mock server.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::json;

use prorecc::{
    validate, CatalogEntry, GeminiClient, GeminiConfig, InMemoryCatalog, RecommendProductsUseCase,
    RecommendationError, TextGenerator,
};

const PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn client_for(server: &Server) -> GeminiClient {
    let config = GeminiConfig::new("test-key")
        .unwrap()
        .with_base_url(server.url())
        .with_timeout(Duration::from_secs(5));
    GeminiClient::new(config)
}

fn candidate_body(text: &str) -> String {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ], "role": "model" }, "finishReason": "STOP" }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_generate_sends_prompt_key_and_sampling_config() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "contents": [ { "parts": [ { "text": "hello model" } ] } ],
            "generationConfig": { "topK": 40, "maxOutputTokens": 2048 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(candidate_body(r#"["1","5"]"#))
        .create_async()
        .await;

    let text = client_for(&server).generate("hello model").await.unwrap();

    assert_eq!(text, r#"["1","5"]"#);
    mock.assert_async().await;
}

async fn error_for_status(status: usize) -> RecommendationError {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(status)
        .with_body(r#"{"error":{"message":"nope"}}"#)
        .create_async()
        .await;

    client_for(&server).generate("p").await.unwrap_err()
}

#[tokio::test]
async fn test_unauthorized_is_invalid_credentials() {
    assert_eq!(error_for_status(401).await, RecommendationError::InvalidCredentials);
}

#[tokio::test]
async fn test_forbidden_is_access_denied() {
    assert_eq!(error_for_status(403).await, RecommendationError::AccessDenied);
}

#[tokio::test]
async fn test_too_many_requests_is_rate_limited() {
    assert_eq!(error_for_status(429).await, RecommendationError::RateLimited);
}

#[tokio::test]
async fn test_other_statuses_carry_the_code() {
    assert_eq!(error_for_status(500).await, RecommendationError::UpstreamFailure(500));
    assert_eq!(error_for_status(404).await, RecommendationError::UpstreamFailure(404));
}

#[tokio::test]
async fn test_no_candidates_is_empty_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"candidates":[]}"#)
        .create_async()
        .await;

    let err = client_for(&server).generate("p").await.unwrap_err();
    assert_eq!(err, RecommendationError::EmptyUpstreamResponse);
}

#[tokio::test]
async fn test_candidate_without_text_is_empty_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#)
        .create_async()
        .await;

    let err = client_for(&server).generate("p").await.unwrap_err();
    assert_eq!(err, RecommendationError::EmptyUpstreamResponse);
}

#[tokio::test]
async fn test_non_json_body_is_a_parse_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let err = client_for(&server).generate("p").await.unwrap_err();
    assert!(matches!(err, RecommendationError::UnparsableResponse(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_connection_failure() {
    let config = GeminiConfig::new("test-key")
        .unwrap()
        .with_base_url("http://127.0.0.1:1")
        .with_timeout(Duration::from_secs(2));

    let err = GeminiClient::new(config).generate("p").await.unwrap_err();
    assert!(
        matches!(
            err,
            RecommendationError::ConnectionFailed(_) | RecommendationError::UpstreamTimeout
        ),
        "unexpected {err:?}"
    );
}

#[tokio::test]
async fn test_pipeline_end_to_end_over_http() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .match_body(Matcher::Regex("ID: 5, Name: MacBook Air M3".to_string()))
        .with_status(200)
        .with_body(candidate_body(
            "Sure! Here are some picks: [\"5\", \"99\", \"1\"]",
        ))
        .create_async()
        .await;

    let catalog = InMemoryCatalog::new(vec![
        CatalogEntry::new("1", "iPhone 15", 799.0, "Smartphones", "A16"),
        CatalogEntry::new("5", "MacBook Air M3", 1099.0, "Laptops", "Fanless"),
    ])
    .unwrap();
    let use_case = RecommendProductsUseCase::new(Arc::new(catalog), Arc::new(client_for(&server)));

    let entries = use_case
        .execute(&validate("laptop for college").unwrap())
        .await
        .unwrap();

    let ids: Vec<&str> = entries.iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["5", "1"]);
}

#[tokio::test]
async fn test_sentinel_over_http_is_no_match() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(candidate_body("NO_PRODUCTS_AVAILABLE"))
        .create_async()
        .await;

    let catalog = InMemoryCatalog::new(vec![CatalogEntry::new(
        "1",
        "iPhone 15",
        799.0,
        "Smartphones",
        "A16",
    )])
    .unwrap();
    let use_case = RecommendProductsUseCase::new(Arc::new(catalog), Arc::new(client_for(&server)));

    let err = use_case
        .execute(&validate("a sailboat").unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RecommendationError::NoMatchingProducts {
            categories: vec!["Smartphones".to_string()]
        }
    );
}

#[tokio::test]
async fn test_slow_body_hits_client_timeout() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(1500));
            w.write_all(candidate_body(r#"["1"]"#).as_bytes())
        })
        .create_async()
        .await;

    let config = GeminiConfig::new("test-key")
        .unwrap()
        .with_base_url(server.url())
        .with_timeout(Duration::from_millis(200));

    let err = GeminiClient::new(config).generate("p").await.unwrap_err();
    assert_eq!(err, RecommendationError::UpstreamTimeout);
}
