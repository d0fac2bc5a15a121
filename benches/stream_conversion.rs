//! Benchmarks for request and stream translation
//!
//! This benchmark measures:
//! - Chunk decoding plus event translation for a text stream
//! - Tool-call chunk translation (argument parsing)
//! - Request payload construction

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use futures::StreamExt;
use stack_nvidia_adapter::adapter::{
    convert_chat_completion_request, convert_chat_completion_stream, Advisories,
};
use stack_nvidia_adapter::types::openai::ChatCompletionChunk;
use stack_nvidia_adapter::types::{ChatCompletionRequest, Message, SamplingParams};

/// Sample NIM stream frames
const TEXT_FRAMES: &[&str] = &[
    r#"{"id":"chatcmpl-123","object":"chat.completion.chunk","created":1694268190,"model":"meta/llama3-8b-instruct","choices":[{"index":0,"delta":{"role":"assistant","content":""},"finish_reason":null}]}"#,
    r#"{"id":"chatcmpl-123","object":"chat.completion.chunk","created":1694268190,"model":"meta/llama3-8b-instruct","choices":[{"index":0,"delta":{"content":"Hello"},"finish_reason":null}]}"#,
    r#"{"id":"chatcmpl-123","object":"chat.completion.chunk","created":1694268190,"model":"meta/llama3-8b-instruct","choices":[{"index":0,"delta":{"content":" there"},"finish_reason":null}]}"#,
    r#"{"id":"chatcmpl-123","object":"chat.completion.chunk","created":1694268190,"model":"meta/llama3-8b-instruct","choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}"#,
];

const TOOL_FRAMES: &[&str] = &[
    r#"{"id":"chatcmpl-456","choices":[{"index":0,"delta":{"role":"assistant","content":"Checking","tool_calls":[{"index":0,"id":"call_abc123","type":"function","function":{"name":"get_weather","arguments":"{\"location\": \"Tokyo\", \"unit\": \"celsius\"}"}}]},"finish_reason":null}]}"#,
    r#"{"id":"chatcmpl-456","choices":[{"index":0,"delta":{},"finish_reason":"tool_calls"}]}"#,
];

fn decode(frames: &[&str]) -> Vec<ChatCompletionChunk> {
    frames
        .iter()
        .map(|f| serde_json::from_str(f).unwrap())
        .collect()
}

fn bench_stream_translation(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("stream_translation");

    for (name, frames) in [("text", TEXT_FRAMES), ("tool_call", TOOL_FRAMES)] {
        let chunks = decode(frames);
        group.throughput(Throughput::Elements(chunks.len() as u64));
        group.bench_function(name, |b| {
            b.to_async(&rt).iter_batched(
                || chunks.clone(),
                |chunks| async move {
                    let input = futures::stream::iter(chunks.into_iter().map(Ok));
                    let events: Vec<_> = convert_chat_completion_stream(input, Advisories::new())
                        .collect()
                        .await;
                    black_box(events)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_request_conversion(c: &mut Criterion) {
    let messages: Vec<Message> = (0..16)
        .map(|i| {
            if i % 2 == 0 {
                Message::user(format!("question {i}"))
            } else {
                Message::tool_response(format!("call-{i}"), "search", "result")
            }
        })
        .collect();
    let request = ChatCompletionRequest::new("meta/llama3-70b-instruct", messages)
        .sampling_params(SamplingParams::top_p(0.9).max_tokens(512))
        .logprobs(3)
        .stream(true);
    let advisories = Advisories::new();

    c.bench_function("request_conversion", |b| {
        b.iter(|| convert_chat_completion_request(black_box(&request), 1, &advisories))
    });
}

criterion_group!(benches, bench_stream_translation, bench_request_conversion);
criterion_main!(benches);
