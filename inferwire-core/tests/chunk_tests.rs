//! Tests for streaming chunk decoding

use inferwire_core::protocol::*;
use inferwire_core::WireCodec;
use proptest::prelude::*;
use serde_json::{json, Value};

const INFERENCE_ID: &str = "00000000-0000-0000-0000-000000000000";

fn chat_frame(content: Value) -> Value {
    json!({
        "inference_id": INFERENCE_ID,
        "episode_id": INFERENCE_ID,
        "variant_name": "v1",
        "content": content
    })
}

#[test]
fn test_decode_chat_chunk() {
    let chunk = decode_inference_chunk(&chat_frame(json!([
        {"type": "text", "id": "0", "text": "Hel"},
        {"type": "tool_call", "id": "call_1", "raw_name": "sea", "raw_arguments": "{\"q"},
        {"type": "thought", "id": "1", "text": "thinking"}
    ])))
    .unwrap();

    let InferenceChunk::Chat(chat) = &chunk else {
        panic!("Expected chat chunk, got {chunk:?}");
    };
    assert_eq!(chat.variant_name, "v1");
    assert_eq!(
        chat.content,
        vec![
            ContentBlockChunk::Text(TextChunk {
                id: "0".to_string(),
                text: "Hel".to_string()
            }),
            ContentBlockChunk::ToolCall(ToolCallChunk {
                id: "call_1".to_string(),
                raw_arguments: "{\"q".to_string(),
                raw_name: "sea".to_string()
            }),
            ContentBlockChunk::Thought(ThoughtChunk {
                id: "1".to_string(),
                text: "thinking".to_string()
            }),
        ]
    );
    assert_eq!(chunk.usage(), None);
    assert_eq!(chunk.finish_reason(), None);
}

#[test]
fn test_terminal_frame_carries_usage() {
    let mut frame = chat_frame(json!([]));
    frame["usage"] = json!({"input_tokens": 12, "output_tokens": 30});
    frame["finish_reason"] = json!("tool_call");

    let chunk = decode_inference_chunk(&frame).unwrap();
    assert_eq!(chunk.usage(), Some(Usage::new(12, 30)));
    assert_eq!(chunk.finish_reason(), Some(FinishReason::ToolCall));
}

#[test]
fn test_decode_json_chunk() {
    let chunk = decode_inference_chunk(&json!({
        "inference_id": INFERENCE_ID,
        "episode_id": INFERENCE_ID,
        "variant_name": "extractor",
        "raw": "{\"na"
    }))
    .unwrap();

    match chunk {
        InferenceChunk::Json(json) => {
            assert_eq!(json.raw, "{\"na");
            assert_eq!(json.usage, None);
        }
        other => panic!("Expected json chunk, got {other:?}"),
    }
}

#[test]
fn test_neither_shape() {
    let err = decode_inference_chunk(&json!({
        "inference_id": INFERENCE_ID,
        "episode_id": INFERENCE_ID,
        "variant_name": "v1",
        "raw": 5
    }))
    .unwrap_err();
    assert!(matches!(err, DecodeError::UnknownResponseShape));
}

#[test]
fn test_unknown_chunk_type() {
    let err = decode_inference_chunk(&chat_frame(json!([{"type": "audio", "id": "0"}]))).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnknownContentBlockType { ref block_type, .. } if block_type == "audio"
    ));
}

#[test]
fn test_tool_call_chunk_needs_no_parsed_fields() {
    let chunk = decode_content_block_chunk(&json!({
        "type": "tool_call",
        "id": "call_1",
        "raw_name": "",
        "raw_arguments": "{\"query\": "
    }))
    .unwrap();
    assert_eq!(chunk.id(), "call_1");
}

#[test]
fn test_text_chunk_requires_id() {
    let err = decode_content_block_chunk(&json!({"type": "text", "text": "a"})).unwrap_err();
    assert!(matches!(err, DecodeError::MissingField { field: "id", .. }));
}

#[test]
fn test_frames_for_unseen_ids_are_not_errors() {
    // correlating ids across frames is the consumer's job
    let codec = WireCodec::new();
    let frames = [
        chat_frame(json!([{"type": "tool_call", "id": "late", "raw_name": "", "raw_arguments": "}"}])),
        chat_frame(json!([{"type": "text", "id": "0", "text": "first"}])),
    ];
    for frame in &frames {
        assert!(codec.decode_inference_chunk(frame).is_ok());
    }
}

#[test]
fn test_chunk_block_limit() {
    let codec = WireCodec::with_options(DecodeOptions::default().with_max_content_blocks(1));
    let frame = chat_frame(json!([
        {"type": "text", "id": "0", "text": "a"},
        {"type": "text", "id": "1", "text": "b"}
    ]));
    assert!(matches!(
        codec.decode_inference_chunk(&frame),
        Err(DecodeError::TooManyContentBlocks { .. })
    ));
}

#[test]
fn test_decode_chunk_from_text() {
    let codec = WireCodec::new();
    let chunk = codec
        .decode_inference_chunk_str(&chat_frame(json!([])).to_string())
        .unwrap();
    assert_eq!(chunk.variant_name(), "v1");
    assert!(matches!(codec.decode_inference_chunk_str(""), Err(DecodeError::Json(_))));
}

proptest! {
    #[test]
    fn prop_frames_decode_independently(pieces in proptest::collection::vec(".*", 1..8)) {
        let codec = WireCodec::new();
        let frames: Vec<Value> = pieces
            .iter()
            .map(|piece| chat_frame(json!([{"type": "text", "id": "0", "text": piece}])))
            .collect();

        let forward: Vec<_> = frames.iter().map(|f| codec.decode_inference_chunk(f).unwrap()).collect();
        let mut backward: Vec<_> = frames.iter().rev().map(|f| codec.decode_inference_chunk(f).unwrap()).collect();
        backward.reverse();
        prop_assert_eq!(&forward, &backward);

        let joined: String = forward
            .iter()
            .filter_map(|chunk| match chunk {
                InferenceChunk::Chat(chat) => Some(chat.content.clone()),
                InferenceChunk::Json(_) => None,
            })
            .flatten()
            .map(|block| match block {
                ContentBlockChunk::Text(text) => text.text,
                _ => String::new(),
            })
            .collect();
        prop_assert_eq!(joined, pieces.concat());
    }
}
