//! Protocol module for the inference gateway wire format
//!
//! This module defines the typed model of everything that crosses the wire:
//! - Content blocks and their streaming fragments
//! - Complete inference responses and stream chunks
//! - Stored datapoints and the payloads that create them
//! - Decoders that reject unknown shapes instead of guessing

pub mod chunk;
pub mod datapoint;
mod error;
mod fields;
pub mod input;
pub mod legacy;
mod options;
pub mod response;
pub mod types;
pub mod wire;

pub use chunk::{
    decode_content_block_chunk, decode_inference_chunk, ChatChunk, ContentBlockChunk,
    InferenceChunk, JsonChunk, TextChunk, ThoughtChunk, ToolCallChunk,
};
pub use datapoint::{
    decode_datapoint, ChatDatapoint, ChatDatapointInsert, Datapoint, JsonDatapoint,
    JsonDatapointInsert, Tool, ToolParams,
};
pub use error::{DecodeError, DecodeResult};
pub use input::{
    ExtraBody, InferenceInput, InputMessage, ProviderExtraBody, Role, System, VariantExtraBody,
};
#[allow(deprecated)]
pub use legacy::{ChatInferenceDatapointInput, JsonInferenceDatapointInput};
pub use options::{DecodeOptions, LegacyTextPolicy, DEPRECATION_TARGET};
pub use response::{
    decode_dynamic_evaluation_run_episode_response, decode_dynamic_evaluation_run_response,
    decode_feedback_response, decode_inference_response, ChatInferenceResponse,
    DynamicEvaluationRunEpisodeResponse, DynamicEvaluationRunResponse, FeedbackResponse,
    InferenceResponse, JsonInferenceOutput, JsonInferenceResponse,
};
pub use types::{
    decode_content_block, ContentBlock, FinishReason, ImageBase64, ImageUrl, InputContent,
    RawText, Text, TextBody, Thought, ToolCall, ToolResult, Usage,
};
pub use wire::{to_wire, to_wire_string};
