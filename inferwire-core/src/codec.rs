//! Configured entry point for decoding and encoding wire payloads

use crate::config::CodecConfig;
use crate::error::InternalContractError;
use crate::protocol::{
    to_wire, ContentBlock, ContentBlockChunk, Datapoint, DecodeOptions, DecodeResult,
    InferenceChunk, InferenceResponse,
};
use serde::Serialize;
use serde_json::Value;

/// Decoder/encoder carrying a fixed set of [`DecodeOptions`].
///
/// The free `decode_*` functions in [`crate::protocol`] behave like
/// `WireCodec::default()`. The codec holds no state between calls; frames and
/// payloads decode independently.
#[derive(Debug, Clone, Default)]
pub struct WireCodec {
    options: DecodeOptions,
}

impl WireCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self::with_options(config.decode_options())
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn decode_content_block(&self, value: &Value) -> DecodeResult<ContentBlock> {
        ContentBlock::decode(value, &self.options)
    }

    pub fn decode_content_block_chunk(&self, value: &Value) -> DecodeResult<ContentBlockChunk> {
        ContentBlockChunk::decode(value)
    }

    pub fn decode_inference_response(&self, value: &Value) -> DecodeResult<InferenceResponse> {
        InferenceResponse::decode(value, &self.options)
    }

    pub fn decode_inference_chunk(&self, value: &Value) -> DecodeResult<InferenceChunk> {
        InferenceChunk::decode(value, &self.options)
    }

    pub fn decode_datapoint(&self, value: &Value) -> DecodeResult<Datapoint> {
        Datapoint::decode(value, &self.options)
    }

    /// Parse JSON text, then decode it as a response
    pub fn decode_inference_response_str(
        &self,
        payload: &str,
    ) -> DecodeResult<InferenceResponse> {
        let value: Value = serde_json::from_str(payload)?;
        self.decode_inference_response(&value)
    }

    /// Parse JSON text, then decode it as a stream frame
    pub fn decode_inference_chunk_str(&self, payload: &str) -> DecodeResult<InferenceChunk> {
        let value: Value = serde_json::from_str(payload)?;
        self.decode_inference_chunk(&value)
    }

    /// Parse JSON text, then decode it as a datapoint
    pub fn decode_datapoint_str(&self, payload: &str) -> DecodeResult<Datapoint> {
        let value: Value = serde_json::from_str(payload)?;
        self.decode_datapoint(&value)
    }

    /// Render any domain object, or collection of them, in wire form
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value, InternalContractError> {
        to_wire(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{DecodeError, LegacyTextPolicy};
    use serde_json::json;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_codec_is_shareable() {
        assert_send_sync::<WireCodec>();
    }

    #[test]
    fn test_from_config() {
        let mut config = CodecConfig::default();
        config.compatibility.legacy_text = LegacyTextPolicy::Reject;
        let codec = WireCodec::from_config(&config);

        let err = codec
            .decode_content_block(&json!({"type": "text", "text": {"city": "Oslo"}}))
            .unwrap_err();
        assert!(matches!(err, DecodeError::LegacyTextRejected));
    }

    #[test]
    fn test_str_entry_points_surface_json_errors() {
        let codec = WireCodec::new();
        assert!(matches!(
            codec.decode_inference_response_str("{not json"),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            codec.decode_inference_chunk_str("{}"),
            Err(DecodeError::UnknownResponseShape)
        ));
    }
}
