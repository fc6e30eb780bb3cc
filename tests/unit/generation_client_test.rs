//! HTTP contract tests for the generation client against a mock endpoint.

use std::time::Duration;

use serde_json::json;
use sitewright::services::generation_client::{generate_with_timeout, GenerationClient, HttpGenerationClient};
use sitewright::types::artifact::Artifact;
use sitewright::types::errors::GenerationError;
use sitewright::types::settings::GenerationSettings;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, timeout: Duration) -> HttpGenerationClient {
    HttpGenerationClient::new(&format!("{}/api/generate", server.uri()), timeout).unwrap()
}

#[tokio::test]
async fn test_posts_description_and_parses_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"description": "A bakery site"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "html": "<h1>Bakery</h1>",
            "css": "h1{}",
            "js": "console.log(1)"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let code = client.generate("A bakery site").await.unwrap();

    assert_eq!(
        Artifact::from(code),
        Artifact::new("<h1>Bakery</h1>", "h1{}", "console.log(1)")
    );
}

#[tokio::test]
async fn test_missing_fields_become_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"html": "<p>only</p>"})))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let artifact = Artifact::from(client.generate("x").await.unwrap());

    assert_eq!(artifact, Artifact::new("<p>only</p>", "", ""));
}

#[tokio::test]
async fn test_extra_fields_are_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "html": "<p>a</p>", "css": "", "js": "", "model": "whatever"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    assert!(client.generate("x").await.is_ok());
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client.generate("x").await.unwrap_err();

    assert!(matches!(err, GenerationError::Status(500)));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client.generate("x").await.unwrap_err();

    assert!(matches!(err, GenerationError::MalformedPayload(_)));
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"html": "late"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(10));
    let err = generate_with_timeout(&client, "x", Duration::from_millis(100))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Timeout(d) if d == Duration::from_millis(100)));
}

#[test]
fn test_from_settings_uses_configured_endpoint() {
    let settings = GenerationSettings {
        endpoint: "http://localhost:8080/gen".into(),
        timeout_secs: 12,
    };
    let client = HttpGenerationClient::from_settings(&settings).unwrap();
    assert_eq!(client.endpoint(), "http://localhost:8080/gen");
}
