//! Transport-reported errors
//!
//! The transport itself lives outside this crate. It hands over the status
//! code and body of a failed call; this module turns them into a
//! [`TransportError`] and offers the classification callers branch on.

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// A failure reported by the gateway, as opposed to a local decode failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Gateway error (status code {status_code}): {}", .text.as_deref().unwrap_or("<empty body>"))]
pub struct TransportError {
    /// HTTP status code of the failed call
    pub status_code: u16,

    /// Response body, when there was one
    pub text: Option<String>,
}

impl TransportError {
    pub fn new(status_code: u16, text: Option<String>) -> Self {
        Self { status_code, text }
    }

    pub fn from_status(status: StatusCode, text: Option<String>) -> Self {
        Self::new(status.as_u16(), text)
    }

    /// Build from a failed response, consuming its body
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let text = match response.text().await {
            Ok(body) if body.is_empty() => None,
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!("failed to read error body for status {}: {}", status, e);
                None
            }
        };
        Self::from_status(status, text)
    }

    /// The status code, if it is a valid HTTP status
    pub fn status(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status_code).ok()
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status_code == StatusCode::TOO_MANY_REQUESTS.as_u16()
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT)
        )
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Human-readable message from the body.
    ///
    /// Understands `{"error": {"message": ...}}`, `{"message": ...}` and
    /// `{"error": "..."}`; falls back to the raw body.
    pub fn error_message(&self) -> Option<String> {
        let body = self.text.as_deref()?;
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| extract_error_details(&json))
            .map(|details| details.message)
            .or_else(|| Some(body.to_string()))
    }

    /// Retry hint carried in the body as `retry_after` seconds
    pub fn retry_after(&self) -> Option<Duration> {
        let body = self.text.as_deref()?;
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| extract_error_details(&json))
            .and_then(|details| details.retry_after_seconds)
            .map(Duration::from_secs)
    }
}

/// Error details extracted from a response body
struct ErrorDetails {
    message: String,
    retry_after_seconds: Option<u64>,
}

fn extract_error_details(json: &Value) -> Option<ErrorDetails> {
    // { "error": { "message": "...", "retry_after": 3 } }
    if let Some(error) = json.get("error") {
        if let Some(message) = error.get("message").and_then(|v| v.as_str()) {
            return Some(ErrorDetails {
                message: message.to_string(),
                retry_after_seconds: error.get("retry_after").and_then(|v| v.as_u64()),
            });
        }
    }

    // { "message": "...", "retry_after": 3 }
    if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
        return Some(ErrorDetails {
            message: message.to_string(),
            retry_after_seconds: json.get("retry_after").and_then(|v| v.as_u64()),
        });
    }

    // { "error": "..." }
    if let Some(error) = json.get("error").and_then(|v| v.as_str()) {
        return Some(ErrorDetails {
            message: error.to_string(),
            retry_after_seconds: json.get("retry_after").and_then(|v| v.as_u64()),
        });
    }

    None
}

/// Parse a `Retry-After` header value given in seconds
pub fn parse_retry_after(header_value: &str) -> Option<Duration> {
    // HTTP-date values are not supported
    header_value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TransportError::new(429, Some("rate limited".to_string()));
        assert_eq!(
            err.to_string(),
            "Gateway error (status code 429): rate limited"
        );

        let err = TransportError::new(502, None);
        assert_eq!(err.to_string(), "Gateway error (status code 502): <empty body>");
    }

    #[test]
    fn test_classification() {
        let rate_limited = TransportError::from_status(StatusCode::TOO_MANY_REQUESTS, None);
        assert!(rate_limited.is_rate_limited());
        assert!(rate_limited.is_client_error());
        assert!(!rate_limited.is_server_error());

        let unavailable = TransportError::from_status(StatusCode::SERVICE_UNAVAILABLE, None);
        assert!(unavailable.is_server_error());
        assert!(!unavailable.is_timeout());

        assert!(TransportError::from_status(StatusCode::GATEWAY_TIMEOUT, None).is_timeout());
    }

    #[test]
    fn test_error_message_formats() {
        let nested = TransportError::new(
            400,
            Some(r#"{"error": {"message": "unknown function"}}"#.to_string()),
        );
        assert_eq!(nested.error_message().as_deref(), Some("unknown function"));

        let flat = TransportError::new(400, Some(r#"{"message": "bad input"}"#.to_string()));
        assert_eq!(flat.error_message().as_deref(), Some("bad input"));

        let string = TransportError::new(400, Some(r#"{"error": "nope"}"#.to_string()));
        assert_eq!(string.error_message().as_deref(), Some("nope"));

        let plain = TransportError::new(500, Some("upstream exploded".to_string()));
        assert_eq!(plain.error_message().as_deref(), Some("upstream exploded"));

        assert_eq!(TransportError::new(500, None).error_message(), None);
    }

    #[test]
    fn test_retry_after() {
        let err = TransportError::new(
            429,
            Some(r#"{"error": {"message": "slow down", "retry_after": 7}}"#.to_string()),
        );
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
        assert_eq!(TransportError::new(429, None).retry_after(), None);

        assert_eq!(parse_retry_after(" 12 "), Some(Duration::from_secs(12)));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }
}
