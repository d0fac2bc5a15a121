use futures::StreamExt;
use stack_nvidia_adapter::adapter::{convert_chat_completion_stream, Advisories};
use stack_nvidia_adapter::types::openai::ChatCompletionChunk;
use stack_nvidia_adapter::types::{
    ChatCompletionResponseEventType, EventDelta, StopReason, ToolCallDeltaContent,
};

/// Decode raw SSE lines the way a transport would hand chunks to the adapter.
fn chunks_from_sse(lines: &[&str]) -> Vec<stack_nvidia_adapter::Result<ChatCompletionChunk>> {
    lines
        .iter()
        .filter_map(|l| l.strip_prefix("data: "))
        .map(str::trim)
        .filter(|data| *data != "[DONE]")
        .map(|data| serde_json::from_str(data).map_err(Into::into))
        .collect()
}

#[tokio::test]
async fn test_nim_text_stream_event_mapping() {
    let lines = vec![
        "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\",\"content\":\"\"}}]}\n\n",
        "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hello\"}}]}\n\n",
        "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\" World\"}}]}\n\n",
        "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{},\"finish_reason\":\"length\"}]}\n\n",
        "data: [DONE]\n\n",
    ];

    let mut events =
        convert_chat_completion_stream(futures::stream::iter(chunks_from_sse(&lines)), Advisories::new());

    let mut collected = Vec::new();
    while let Some(event) = events.next().await {
        collected.push(event.unwrap().event);
    }

    assert_eq!(collected.len(), 5);
    assert_eq!(collected[0].event_type, ChatCompletionResponseEventType::Start);
    assert_eq!(
        collected.last().unwrap().event_type,
        ChatCompletionResponseEventType::Complete
    );

    let text: String = collected
        .iter()
        .filter_map(|e| e.delta.as_text())
        .collect();
    assert_eq!(text, "Hello World");
    assert_eq!(
        collected.last().unwrap().stop_reason,
        Some(StopReason::OutOfTokens)
    );
}

#[test]
fn test_nim_tool_call_stream_event_mapping() {
    let lines = vec![
        "data: {\"id\":\"c2\",\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\",\"content\":null,\"tool_calls\":[{\"index\":0,\"id\":\"chatcmpl-tool-1\",\"type\":\"function\",\"function\":{\"name\":\"get_weather\",\"arguments\":\"{\\\"city\\\": \\\"Santa Clara\\\"}\"}}]}}]}",
        "data: {\"id\":\"c2\",\"choices\":[{\"index\":0,\"delta\":{},\"finish_reason\":\"tool_calls\"}]}",
        "data: [DONE]",
    ];

    let advisories = Advisories::new();
    let events: Vec<_> = tokio_test::block_on(
        convert_chat_completion_stream(
            futures::stream::iter(chunks_from_sse(&lines)),
            advisories.clone(),
        )
        .collect(),
    );
    let events: Vec<_> = events.into_iter().map(|e| e.unwrap().event).collect();

    assert_eq!(events.len(), 3);
    match &events[0].delta {
        EventDelta::ToolCall(delta) => match &delta.content {
            ToolCallDeltaContent::ToolCall(call) => {
                assert_eq!(call.call_id, "chatcmpl-tool-1");
                assert_eq!(call.tool_name, "get_weather");
                assert_eq!(call.arguments["city"], "Santa Clara");
            }
            other => panic!("expected complete tool call, got {:?}", other),
        },
        other => panic!("expected tool call delta, got {:?}", other),
    }
    assert_eq!(events[1].delta.as_text(), Some(""));
    assert_eq!(events[2].stop_reason, Some(StopReason::EndOfMessage));
    assert!(advisories.is_empty());
}

#[tokio::test]
async fn test_events_serialize_to_stack_wire_shape() {
    let lines = ["data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"hi\"},\"finish_reason\":\"stop\"}]}"];
    let events: Vec<_> =
        convert_chat_completion_stream(futures::stream::iter(chunks_from_sse(&lines)), Advisories::new())
            .map(|e| serde_json::to_value(e.unwrap()).unwrap())
            .collect()
            .await;

    assert_eq!(
        events,
        vec![
            serde_json::json!({"event": {"event_type": "start", "delta": "hi"}}),
            serde_json::json!({"event": {"event_type": "complete", "delta": "", "stop_reason": "end_of_turn"}}),
        ]
    );
}
