//! Decode error types for inbound wire payloads

use serde_json::Value;
use thiserror::Error;

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors raised while turning a wire payload into a typed value.
///
/// A decode either returns a complete object or one of these; nothing is
/// ever partially decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The `type` of a content block (or content block chunk) is not recognized
    #[error("Unknown content block type: {payload}")]
    UnknownContentBlockType {
        /// The unrecognized discriminator value
        block_type: String,
        /// The full offending block
        payload: Value,
    },

    /// Neither shape of a response or chunk matched the payload
    #[error("Unable to determine response type")]
    UnknownResponseShape,

    /// The `type` of a datapoint is neither `chat` nor `json`
    #[error("Unknown datapoint type: {0}")]
    UnknownDatapointType(String),

    /// A non-empty `finish_reason` outside the closed enumeration
    #[error("Unknown finish reason: {0}")]
    UnknownFinishReason(String),

    #[error("Expected a JSON object for {context}, found {found}")]
    NotAnObject {
        context: &'static str,
        found: &'static str,
    },

    #[error("Missing required field `{field}` in {context}")]
    MissingField {
        context: &'static str,
        field: &'static str,
    },

    #[error("Unexpected field `{field}` in {context}")]
    UnexpectedField { context: &'static str, field: String },

    #[error("Invalid field `{field}` in {context}: {message}")]
    InvalidField {
        context: &'static str,
        field: &'static str,
        message: String,
    },

    #[error("Invalid UUID in field `{field}` of {context}: {source}")]
    InvalidUuid {
        context: &'static str,
        field: &'static str,
        #[source]
        source: uuid::Error,
    },

    /// A text block carried both `text` and `arguments`
    #[error("Only one of `text` or `arguments` must be provided.")]
    TextAndArguments,

    /// A text block carried neither `text` nor `arguments`
    #[error("Either `text` or `arguments` must be provided.")]
    MissingTextAndArguments,

    /// A structured value in `text` while the legacy shape is disabled
    #[error("Structured values in `text` are no longer accepted; provide them as `arguments`")]
    LegacyTextRejected,

    #[error("{context} has {count} content blocks, more than the configured limit of {limit}")]
    TooManyContentBlocks {
        context: &'static str,
        count: usize,
        limit: usize,
    },

    /// The payload was not valid JSON text
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DecodeError {
    /// Name of the field this error points at, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            DecodeError::MissingField { field, .. }
            | DecodeError::InvalidField { field, .. }
            | DecodeError::InvalidUuid { field, .. } => Some(field),
            DecodeError::UnexpectedField { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }
}
