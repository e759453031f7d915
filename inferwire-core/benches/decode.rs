use criterion::{black_box, criterion_group, criterion_main, Criterion};
use inferwire_core::protocol::{decode_inference_chunk, decode_inference_response, to_wire};
use serde_json::{json, Value};

fn chat_response(blocks: usize) -> Value {
    let content: Vec<Value> = (0..blocks)
        .map(|i| match i % 3 {
            0 => json!({"type": "text", "text": "The quick brown fox jumps over the lazy dog."}),
            1 => json!({
                "type": "tool_call",
                "id": format!("call_{i}"),
                "raw_name": "search",
                "raw_arguments": "{\"query\": \"rust serde\"}",
                "name": "search",
                "arguments": {"query": "rust serde"}
            }),
            _ => json!({"type": "thought", "value": "Need to look this up first."}),
        })
        .collect();

    json!({
        "inference_id": "00000000-0000-0000-0000-000000000000",
        "episode_id": "00000000-0000-0000-0000-000000000000",
        "variant_name": "v1",
        "content": content,
        "usage": {"input_tokens": 120, "output_tokens": 48},
        "finish_reason": "stop"
    })
}

fn bench_decode(c: &mut Criterion) {
    let small = chat_response(3);
    let large = chat_response(300);
    let frame = json!({
        "inference_id": "00000000-0000-0000-0000-000000000000",
        "episode_id": "00000000-0000-0000-0000-000000000000",
        "variant_name": "v1",
        "content": [{"type": "text", "id": "0", "text": "tok"}]
    });

    c.bench_function("decode_chat_response_3_blocks", |b| {
        b.iter(|| decode_inference_response(black_box(&small)))
    });
    c.bench_function("decode_chat_response_300_blocks", |b| {
        b.iter(|| decode_inference_response(black_box(&large)))
    });
    c.bench_function("decode_stream_frame", |b| {
        b.iter(|| decode_inference_chunk(black_box(&frame)))
    });

    if let Ok(response) = decode_inference_response(&large) {
        c.bench_function("encode_chat_response_300_blocks", |b| {
            b.iter(|| to_wire(black_box(&response)))
        });
    }
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
