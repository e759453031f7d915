//! Tests for turning failed gateway calls into transport errors

use inferwire_core::{Error, TransportError};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn failed_call(status: u16, body: &str) -> TransportError {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/inference"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&mock_server)
        .await;

    let response = reqwest::Client::new()
        .post(format!("{}/inference", mock_server.uri()))
        .send()
        .await
        .unwrap();
    assert!(!response.status().is_success());
    TransportError::from_response(response).await
}

#[tokio::test]
async fn test_rate_limited() {
    let error = failed_call(
        429,
        r#"{"error": {"message": "Too many requests", "retry_after": 2}}"#,
    )
    .await;

    assert_eq!(error.status_code, 429);
    assert!(error.is_rate_limited());
    assert!(error.is_client_error());
    assert_eq!(error.error_message().as_deref(), Some("Too many requests"));
    assert_eq!(error.retry_after(), Some(Duration::from_secs(2)));
}

#[tokio::test]
async fn test_server_error_with_plain_body() {
    let error = failed_call(502, "upstream unavailable").await;

    assert!(error.is_server_error());
    assert!(!error.is_rate_limited());
    assert_eq!(error.text.as_deref(), Some("upstream unavailable"));
    assert_eq!(error.error_message().as_deref(), Some("upstream unavailable"));
    assert_eq!(
        error.to_string(),
        "Gateway error (status code 502): upstream unavailable"
    );
}

#[tokio::test]
async fn test_empty_body() {
    let error = failed_call(504, "").await;

    assert_eq!(error.text, None);
    assert!(error.is_timeout());
    assert_eq!(error.error_message(), None);
    assert_eq!(
        error.to_string(),
        "Gateway error (status code 504): <empty body>"
    );
}

#[tokio::test]
async fn test_transport_errors_stay_distinct_from_decode_errors() {
    let error: Error = failed_call(400, r#"{"message": "bad request"}"#).await.into();

    let transport = error.as_transport().expect("transport error");
    assert_eq!(transport.status_code, 400);
    assert_eq!(transport.error_message().as_deref(), Some("bad request"));

    let decode: Error = inferwire_core::decode_content_block(&serde_json::json!({"type": "widget"}))
        .unwrap_err()
        .into();
    assert!(decode.as_transport().is_none());
    assert!(matches!(decode, Error::Decode(_)));
}
