//! Complete inference responses and the small identifier responses

use super::error::{DecodeError, DecodeResult};
use super::fields::Fields;
use super::options::DecodeOptions;
use super::types::{ContentBlock, FinishReason, Usage};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Output of a JSON function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonInferenceOutput {
    /// The model's output text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,

    /// `raw` parsed as JSON, when it parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed: Option<Value>,
}

/// Response of a chat function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatInferenceResponse {
    pub inference_id: Uuid,
    pub episode_id: Uuid,
    pub variant_name: String,
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

/// Response of a JSON function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonInferenceResponse {
    pub inference_id: Uuid,
    pub episode_id: Uuid,
    pub variant_name: String,
    pub output: JsonInferenceOutput,
    pub usage: Usage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

/// A complete (non-streaming) inference response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InferenceResponse {
    Chat(ChatInferenceResponse),
    Json(JsonInferenceResponse),
}

impl InferenceResponse {
    /// Decode a response.
    ///
    /// The shape is picked by field presence, in this order: `content` as an
    /// array means chat, otherwise `output` as an object means JSON. The order
    /// matters for payloads that carry both.
    pub(crate) fn decode(value: &Value, options: &DecodeOptions) -> DecodeResult<Self> {
        let fields = Fields::new(value, "inference response")?;

        if let Some(Value::Array(blocks)) = fields.get("content") {
            tracing::debug!(blocks = blocks.len(), "decoding chat inference response");
            options.check_block_count("inference response", blocks.len())?;
            let fields = fields.with_context("chat inference response");
            let content = blocks
                .iter()
                .map(|block| ContentBlock::decode(block, options))
                .collect::<DecodeResult<Vec<_>>>()?;

            return Ok(InferenceResponse::Chat(ChatInferenceResponse {
                inference_id: fields.required_uuid("inference_id")?,
                episode_id: fields.required_uuid("episode_id")?,
                variant_name: fields.required_str("variant_name")?.to_string(),
                content,
                usage: fields.required_as("usage")?,
                finish_reason: FinishReason::decode_field(&fields)?,
            }));
        }

        if let Some(Value::Object(_)) = fields.get("output") {
            tracing::debug!("decoding json inference response");
            let fields = fields.with_context("json inference response");

            return Ok(InferenceResponse::Json(JsonInferenceResponse {
                inference_id: fields.required_uuid("inference_id")?,
                episode_id: fields.required_uuid("episode_id")?,
                variant_name: fields.required_str("variant_name")?.to_string(),
                output: fields.required_as("output")?,
                usage: fields.required_as("usage")?,
                finish_reason: FinishReason::decode_field(&fields)?,
            }));
        }

        Err(DecodeError::UnknownResponseShape)
    }

    pub fn inference_id(&self) -> Uuid {
        match self {
            InferenceResponse::Chat(response) => response.inference_id,
            InferenceResponse::Json(response) => response.inference_id,
        }
    }

    pub fn episode_id(&self) -> Uuid {
        match self {
            InferenceResponse::Chat(response) => response.episode_id,
            InferenceResponse::Json(response) => response.episode_id,
        }
    }

    pub fn variant_name(&self) -> &str {
        match self {
            InferenceResponse::Chat(response) => &response.variant_name,
            InferenceResponse::Json(response) => &response.variant_name,
        }
    }

    pub fn usage(&self) -> Usage {
        match self {
            InferenceResponse::Chat(response) => response.usage,
            InferenceResponse::Json(response) => response.usage,
        }
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        match self {
            InferenceResponse::Chat(response) => response.finish_reason,
            InferenceResponse::Json(response) => response.finish_reason,
        }
    }

    pub fn as_chat(&self) -> Option<&ChatInferenceResponse> {
        match self {
            InferenceResponse::Chat(response) => Some(response),
            InferenceResponse::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&JsonInferenceResponse> {
        match self {
            InferenceResponse::Json(response) => Some(response),
            InferenceResponse::Chat(_) => None,
        }
    }
}

/// Decode a complete inference response with default options
pub fn decode_inference_response(value: &Value) -> DecodeResult<InferenceResponse> {
    InferenceResponse::decode(value, &DecodeOptions::default())
}

// ============================================================================
// Identifier responses
// ============================================================================

/// Acknowledgement of a feedback submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FeedbackResponse {
    pub feedback_id: Uuid,
}

/// A newly started dynamic evaluation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DynamicEvaluationRunResponse {
    pub run_id: Uuid,
}

/// A newly started episode within a dynamic evaluation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DynamicEvaluationRunEpisodeResponse {
    pub episode_id: Uuid,
}

pub fn decode_feedback_response(value: &Value) -> DecodeResult<FeedbackResponse> {
    let fields = Fields::new(value, "feedback response")?;
    Ok(FeedbackResponse {
        feedback_id: fields.required_uuid("feedback_id")?,
    })
}

pub fn decode_dynamic_evaluation_run_response(
    value: &Value,
) -> DecodeResult<DynamicEvaluationRunResponse> {
    let fields = Fields::new(value, "dynamic evaluation run response")?;
    Ok(DynamicEvaluationRunResponse {
        run_id: fields.required_uuid("run_id")?,
    })
}

pub fn decode_dynamic_evaluation_run_episode_response(
    value: &Value,
) -> DecodeResult<DynamicEvaluationRunEpisodeResponse> {
    let fields = Fields::new(value, "dynamic evaluation run episode response")?;
    Ok(DynamicEvaluationRunEpisodeResponse {
        episode_id: fields.required_uuid("episode_id")?,
    })
}
