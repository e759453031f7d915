//! Inferwire Core Library
//!
//! Typed decoding and encoding for a multi-modal LLM inference gateway's wire
//! format: inference responses, stream chunks, content blocks and stored
//! datapoints. Transport, retries and credentials are left to the caller.

pub mod codec;
pub mod config;
pub mod error;
pub mod http;
pub mod protocol;

pub use codec::WireCodec;
pub use error::{Error, InternalContractError, Result};
pub use http::TransportError;
pub use protocol::{
    decode_content_block, decode_content_block_chunk, decode_datapoint, decode_inference_chunk,
    decode_inference_response, to_wire, ContentBlock, ContentBlockChunk, Datapoint, DecodeError,
    FinishReason, InferenceChunk, InferenceResponse, Usage,
};

/// Returns the version of the Inferwire Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
