//! Streaming inference chunks
//!
//! Each frame of a stream decodes on its own. Frames for the same block share
//! an `id`; stitching them back into a [`ContentBlock`](super::ContentBlock)
//! is left to the consumer of the stream.

use super::error::{DecodeError, DecodeResult};
use super::fields::Fields;
use super::options::DecodeOptions;
use super::types::{FinishReason, Usage};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// A fragment of one content block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlockChunk {
    Text(TextChunk),
    ToolCall(ToolCallChunk),
    Thought(ThoughtChunk),
}

/// A piece of text. Several text blocks in one stream are told apart by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextChunk {
    pub id: String,
    pub text: String,
}

/// A piece of a tool call. `raw_arguments` is partial JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolCallChunk {
    /// Provider tool call id
    pub id: String,
    pub raw_arguments: String,
    pub raw_name: String,
}

/// A piece of a reasoning trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThoughtChunk {
    pub id: String,
    pub text: String,
}

impl ContentBlockChunk {
    pub(crate) fn decode(value: &Value) -> DecodeResult<Self> {
        let fields = Fields::new(value, "content block chunk")?;
        let block_type = fields.required_str("type")?;

        match block_type {
            "text" => {
                let fields = fields.with_context("text chunk");
                Ok(ContentBlockChunk::Text(TextChunk {
                    id: fields.required_str("id")?.to_string(),
                    text: fields.required_str("text")?.to_string(),
                }))
            }
            "tool_call" => {
                let fields = fields.with_context("tool_call chunk");
                Ok(ContentBlockChunk::ToolCall(ToolCallChunk {
                    id: fields.required_str("id")?.to_string(),
                    raw_arguments: fields.required_str("raw_arguments")?.to_string(),
                    raw_name: fields.required_str("raw_name")?.to_string(),
                }))
            }
            "thought" => {
                let fields = fields.with_context("thought chunk");
                Ok(ContentBlockChunk::Thought(ThoughtChunk {
                    id: fields.required_str("id")?.to_string(),
                    text: fields.required_str("text")?.to_string(),
                }))
            }
            other => Err(DecodeError::UnknownContentBlockType {
                block_type: other.to_string(),
                payload: value.clone(),
            }),
        }
    }

    /// Id correlating this fragment with the others of its block
    pub fn id(&self) -> &str {
        match self {
            ContentBlockChunk::Text(chunk) => &chunk.id,
            ContentBlockChunk::ToolCall(chunk) => &chunk.id,
            ContentBlockChunk::Thought(chunk) => &chunk.id,
        }
    }
}

/// Decode one content block chunk
pub fn decode_content_block_chunk(value: &Value) -> DecodeResult<ContentBlockChunk> {
    ContentBlockChunk::decode(value)
}

/// One frame of a chat function stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatChunk {
    pub inference_id: Uuid,
    pub episode_id: Uuid,
    pub variant_name: String,
    pub content: Vec<ContentBlockChunk>,
    /// Usually only present on the last frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

/// One frame of a JSON function stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonChunk {
    pub inference_id: Uuid,
    pub episode_id: Uuid,
    pub variant_name: String,
    /// Partial JSON text
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

/// One frame of an inference stream
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InferenceChunk {
    Chat(ChatChunk),
    Json(JsonChunk),
}

impl InferenceChunk {
    /// Decode a frame.
    ///
    /// `content` (an array) is checked before `raw` (a string); a frame
    /// carrying both is a chat chunk.
    pub(crate) fn decode(value: &Value, options: &DecodeOptions) -> DecodeResult<Self> {
        let fields = Fields::new(value, "inference chunk")?;

        if let Some(Value::Array(blocks)) = fields.get("content") {
            options.check_block_count("inference chunk", blocks.len())?;
            let fields = fields.with_context("chat chunk");
            let content = blocks
                .iter()
                .map(ContentBlockChunk::decode)
                .collect::<DecodeResult<Vec<_>>>()?;

            return Ok(InferenceChunk::Chat(ChatChunk {
                inference_id: fields.required_uuid("inference_id")?,
                episode_id: fields.required_uuid("episode_id")?,
                variant_name: fields.required_str("variant_name")?.to_string(),
                content,
                usage: fields.optional_as("usage")?,
                finish_reason: FinishReason::decode_field(&fields)?,
            }));
        }

        if let Some(Value::String(raw)) = fields.get("raw") {
            let fields = fields.with_context("json chunk");
            return Ok(InferenceChunk::Json(JsonChunk {
                inference_id: fields.required_uuid("inference_id")?,
                episode_id: fields.required_uuid("episode_id")?,
                variant_name: fields.required_str("variant_name")?.to_string(),
                raw: raw.clone(),
                usage: fields.optional_as("usage")?,
                finish_reason: FinishReason::decode_field(&fields)?,
            }));
        }

        Err(DecodeError::UnknownResponseShape)
    }

    pub fn inference_id(&self) -> Uuid {
        match self {
            InferenceChunk::Chat(chunk) => chunk.inference_id,
            InferenceChunk::Json(chunk) => chunk.inference_id,
        }
    }

    pub fn episode_id(&self) -> Uuid {
        match self {
            InferenceChunk::Chat(chunk) => chunk.episode_id,
            InferenceChunk::Json(chunk) => chunk.episode_id,
        }
    }

    pub fn variant_name(&self) -> &str {
        match self {
            InferenceChunk::Chat(chunk) => &chunk.variant_name,
            InferenceChunk::Json(chunk) => &chunk.variant_name,
        }
    }

    pub fn usage(&self) -> Option<Usage> {
        match self {
            InferenceChunk::Chat(chunk) => chunk.usage,
            InferenceChunk::Json(chunk) => chunk.usage,
        }
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        match self {
            InferenceChunk::Chat(chunk) => chunk.finish_reason,
            InferenceChunk::Json(chunk) => chunk.finish_reason,
        }
    }
}

/// Decode one stream frame with default options
pub fn decode_inference_chunk(value: &Value) -> DecodeResult<InferenceChunk> {
    InferenceChunk::decode(value, &DecodeOptions::default())
}
