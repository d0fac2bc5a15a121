//! Provider chunk stream -> stack event stream
//!
//! Every stream has the shape `start`, `progress`*, `complete`:
//! - the first emitted event is `start`, later ones `progress`
//! - each chunk yields one event, or two when it carries both content and a tool call
//! - a final `complete` event with an empty delta carries the stop reason
//!
//! NIM only streams fully formed tool calls, so every tool-call event is emitted with
//! `parse_status = success`; there are no started / in-progress states to track.

use futures::{stream, Stream, StreamExt};
use std::collections::VecDeque;
use tracing::debug;

use super::advisory::{Advisories, Advisory};
use super::response::{convert_finish_reason, convert_logprobs, convert_tool_calls};
use crate::types::events::{
    ChatCompletionResponseEvent, ChatCompletionResponseEventType, ChatCompletionResponseStreamChunk,
    EventDelta,
};
use crate::types::message::StopReason;
use crate::types::openai::ChatCompletionChunk;
use crate::types::response::TokenLogProbs;
use crate::types::tool::ToolCallDelta;
use crate::{BoxStream, Result};

/// Whether a stream has emitted its first event yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamPhase {
    #[default]
    NotStarted,
    Emitting,
}

impl StreamPhase {
    /// Event type for the next non-terminal emission.
    pub fn advance(&mut self) -> ChatCompletionResponseEventType {
        match self {
            StreamPhase::NotStarted => {
                *self = StreamPhase::Emitting;
                ChatCompletionResponseEventType::Start
            }
            StreamPhase::Emitting => ChatCompletionResponseEventType::Progress,
        }
    }
}

/// Per-stream translation state.
struct StreamState {
    phase: StreamPhase,
    // Assumes at most one meaningful finish reason per stream.
    stop_reason: Option<StopReason>,
    pending: VecDeque<Result<ChatCompletionResponseStreamChunk>>,
    finished: bool,
    emitted: usize,
    advisories: Advisories,
}

impl StreamState {
    fn new(advisories: Advisories) -> Self {
        Self {
            phase: StreamPhase::NotStarted,
            stop_reason: None,
            pending: VecDeque::new(),
            finished: false,
            emitted: 0,
            advisories,
        }
    }

    fn emit(&mut self, delta: EventDelta, logprobs: Option<Vec<TokenLogProbs>>) {
        let event_type = self.phase.advance();
        self.pending.push_back(Ok(ChatCompletionResponseStreamChunk {
            event: ChatCompletionResponseEvent {
                event_type,
                delta,
                logprobs,
                stop_reason: None,
            },
        }));
    }

    fn on_chunk(&mut self, chunk: ChatCompletionChunk) {
        // NIM sends one choice per chunk.
        let Some(choice) = chunk.choices.into_iter().next() else {
            debug!(chunk_id = %chunk.id, "skipping chunk without choices");
            return;
        };

        if let Some(reason) = choice.finish_reason.as_deref().filter(|r| !r.is_empty()) {
            self.stop_reason = Some(convert_finish_reason(Some(reason)));
        }

        let logprobs = convert_logprobs(choice.logprobs.as_ref());
        let delta = choice.delta;

        let Some(tool_calls) = delta.tool_calls.filter(|calls| !calls.is_empty()) else {
            self.emit(EventDelta::Text(delta.content.unwrap_or_default()), logprobs);
            return;
        };

        // An event holds either text or a tool call, so content goes out first.
        if let Some(content) = delta.content.filter(|c| !c.is_empty()) {
            self.emit(EventDelta::Text(content), logprobs.clone());
        }

        if tool_calls.len() > 1 {
            self.advisories.record(Advisory::MultipleToolCallsInDelta {
                count: tool_calls.len(),
                kept_call_id: tool_calls[0].id.clone().unwrap_or_default(),
            });
        }

        // Every call is parsed, so a bad argument string in a dropped call still fails the chunk.
        match convert_tool_calls(Some(tool_calls.as_slice())) {
            Ok(calls) => {
                if let Some(call) = calls.into_iter().next() {
                    self.emit(ToolCallDelta::complete(call).into(), logprobs);
                }
            }
            Err(e) => self.pending.push_back(Err(e)),
        }
    }

    fn complete(&mut self) -> ChatCompletionResponseStreamChunk {
        self.finished = true;
        debug!(
            events = self.emitted + 1,
            stop_reason = ?self.stop_reason,
            "chat completion stream complete"
        );
        ChatCompletionResponseStreamChunk {
            event: ChatCompletionResponseEvent {
                event_type: ChatCompletionResponseEventType::Complete,
                delta: EventDelta::Text(String::new()),
                logprobs: None,
                stop_reason: self.stop_reason,
            },
        }
    }
}

/// Translate a stream of provider chunks into stack stream events.
///
/// The returned stream is lazy: upstream chunks are pulled only as events are requested, and
/// dropping it stops consuming the input. The first error (from upstream or from a chunk whose
/// tool-call arguments are not a JSON object) is yielded in place and ends the stream; no
/// `complete` event follows it.
pub fn convert_chat_completion_stream<S>(
    input: S,
    advisories: Advisories,
) -> BoxStream<'static, ChatCompletionResponseStreamChunk>
where
    S: Stream<Item = Result<ChatCompletionChunk>> + Send + 'static,
{
    let input: BoxStream<'static, ChatCompletionChunk> = Box::pin(input);

    let events = stream::unfold(
        (input, StreamState::new(advisories)),
        |(mut input, mut state)| async move {
            loop {
                if let Some(item) = state.pending.pop_front() {
                    match item {
                        Ok(_) => state.emitted += 1,
                        Err(_) => {
                            state.pending.clear();
                            state.finished = true;
                        }
                    }
                    return Some((item, (input, state)));
                }
                if state.finished {
                    return None;
                }

                match input.next().await {
                    Some(Ok(chunk)) => state.on_chunk(chunk),
                    Some(Err(e)) => state.pending.push_back(Err(e)),
                    None => {
                        let complete = state.complete();
                        return Some((Ok(complete), (input, state)));
                    }
                }
            }
        },
    );

    Box::pin(events)
}
