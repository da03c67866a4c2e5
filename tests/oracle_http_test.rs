// Oracle provider HTTP behaviour
//
// Runs each provider against a local mock server and verifies that:
// 1. Successful replies come back as raw text
// 2. HTTP failures are classified into the oracle error taxonomy
// 3. A failing provider degrades a comparison instead of failing it

use anyhow::Result;
use mockito::Matcher;
use std::time::Duration;
use textsim::compare::{compare, CompareConfig};
use textsim::config::OracleSettings;
use textsim::oracle::claude::ClaudeOracle;
use textsim::oracle::gemini::GeminiOracle;
use textsim::oracle::openai::OpenAIOracle;
use textsim::oracle::{create_oracle, Availability, OracleError, SemanticOracle};

const GEMINI_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";
const TIMEOUT: Duration = Duration::from_secs(5);

fn gemini_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    })
    .to_string()
}

#[tokio::test]
async fn test_gemini_success() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", GEMINI_PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::Regex("Text 1".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body(r#"{"semantic_similarity": 0.8}"#))
        .create_async()
        .await;

    let oracle = GeminiOracle::new("test-key".to_string(), TIMEOUT)?.with_base_url(server.url());
    let reply = oracle.invoke("Compare Text 1 and Text 2").await?;

    assert_eq!(reply, r#"{"semantic_similarity": 0.8}"#);
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_gemini_without_candidates_is_malformed() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GEMINI_PATH)
        .with_status(200)
        .with_body(r#"{"candidates": []}"#)
        .create_async()
        .await;

    let oracle = GeminiOracle::new("k".to_string(), TIMEOUT)?.with_base_url(server.url());
    let err = oracle.invoke("prompt").await.unwrap_err();
    assert_eq!(err.kind(), "malformed_response");
    Ok(())
}

#[tokio::test]
async fn test_status_classification() -> Result<()> {
    let cases = [
        (401, "auth"),
        (403, "auth"),
        (429, "quota"),
        (400, "malformed_request"),
        (504, "timeout"),
        (500, "network"),
    ];

    for (status, kind) in cases {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", GEMINI_PATH)
            .with_status(status)
            .with_body(r#"{"error": {"message": "nope"}}"#)
            .create_async()
            .await;

        let oracle = GeminiOracle::new("k".to_string(), TIMEOUT)?.with_base_url(server.url());
        let err = oracle.invoke("prompt").await.unwrap_err();
        assert_eq!(err.kind(), kind, "status {}", status);
    }
    Ok(())
}

#[tokio::test]
async fn test_invalid_json_body_is_malformed() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GEMINI_PATH)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let oracle = GeminiOracle::new("k".to_string(), TIMEOUT)?.with_base_url(server.url());
    let err = oracle.invoke("prompt").await.unwrap_err();
    assert!(matches!(err, OracleError::MalformedResponse(_)));
    Ok(())
}

#[tokio::test]
async fn test_connection_refused_is_network() -> Result<()> {
    // Reserve a port, then free it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let url = format!("http://{}", listener.local_addr()?);
    drop(listener);

    let oracle = GeminiOracle::new("k".to_string(), TIMEOUT)?.with_base_url(url);
    let err = oracle.invoke("prompt").await.unwrap_err();
    assert_eq!(err.kind(), "network");
    Ok(())
}

#[tokio::test]
async fn test_claude_success() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "claude-key")
        .match_header("anthropic-version", "2023-06-01")
        .with_status(200)
        .with_body(
            r#"{"content": [
                {"type": "thinking", "thinking": "..."},
                {"type": "text", "text": "Semantic similarity: 0.7"}
            ]}"#,
        )
        .create_async()
        .await;

    let oracle = ClaudeOracle::new("claude-key".to_string(), TIMEOUT)?.with_base_url(server.url());
    let reply = oracle.invoke("prompt").await?;

    assert_eq!(reply, "Semantic similarity: 0.7");
    assert_eq!(oracle.name(), "claude");
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_openai_success_and_auth_failure() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let ok = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer good-key")
        .with_status(200)
        .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "{\"insights\": \"close\"}"}}]}"#)
        .create_async()
        .await;
    let rejected = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer bad-key")
        .with_status(401)
        .with_body(r#"{"error": "invalid api key"}"#)
        .create_async()
        .await;

    let good = OpenAIOracle::new("good-key".to_string(), TIMEOUT)?.with_base_url(server.url());
    assert_eq!(good.invoke("prompt").await?, r#"{"insights": "close"}"#);

    let bad = OpenAIOracle::new("bad-key".to_string(), TIMEOUT)?.with_base_url(server.url());
    let err = bad.invoke("prompt").await.unwrap_err();
    assert!(matches!(err, OracleError::Auth(_)));

    ok.assert_async().await;
    rejected.assert_async().await;
    Ok(())
}

/// Settings with a base URL route the factory-built oracle to the mock server
#[tokio::test]
async fn test_factory_oracle_end_to_end() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GEMINI_PATH)
        .with_status(200)
        .with_body(gemini_body(
            r#"```json
{"semantic_similarity": 0.91, "themes_text1": ["weather"], "themes_text2": ["weather", "travel"]}
```"#,
        ))
        .create_async()
        .await;

    let settings = OracleSettings {
        api_key: Some("test-key".to_string()),
        base_url: Some(server.url()),
        ..OracleSettings::default()
    };
    let oracle = create_oracle(&settings)?.expect("oracle configured");

    let result = compare(
        "It rained all day",
        "The rain kept us from travelling",
        &CompareConfig::default(),
        Some(oracle.as_ref()),
    )
    .await;

    assert!(result.ai_available);
    assert_eq!(result.oracle_provider.as_deref(), Some("gemini"));
    assert_eq!(result.semantic_analysis.semantic_similarity, Availability::Available(0.91));
    assert_eq!(
        result.semantic_analysis.themes_text2,
        Availability::Available(vec!["weather".to_string(), "travel".to_string()])
    );
    Ok(())
}

#[tokio::test]
async fn test_quota_failure_degrades_comparison() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", GEMINI_PATH)
        .with_status(429)
        .with_body("rate limited")
        .create_async()
        .await;

    let oracle = GeminiOracle::new("k".to_string(), TIMEOUT)?.with_base_url(server.url());
    let result = compare("alpha beta", "beta gamma", &CompareConfig::default(), Some(&oracle)).await;

    assert!(!result.ai_available);
    assert_eq!(result.oracle_failure.as_ref().map(|f| f.kind.as_str()), Some("quota"));
    assert!((result.metrics.jaccard_index.value - 1.0 / 3.0).abs() < 1e-9);
    Ok(())
}
