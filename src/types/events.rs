//! Stack-schema streaming events

use serde::{Deserialize, Serialize};

use super::message::StopReason;
use super::response::TokenLogProbs;
use super::tool::ToolCallDelta;

/// Position of an event within a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatCompletionResponseEventType {
    Start,
    Progress,
    Complete,
}

/// Event payload: a text fragment or a tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventDelta {
    Text(String),
    ToolCall(ToolCallDelta),
}

impl EventDelta {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            EventDelta::Text(s) => Some(s),
            EventDelta::ToolCall(_) => None,
        }
    }
}

impl From<String> for EventDelta {
    fn from(value: String) -> Self {
        EventDelta::Text(value)
    }
}

impl From<ToolCallDelta> for EventDelta {
    fn from(value: ToolCallDelta) -> Self {
        EventDelta::ToolCall(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponseEvent {
    pub event_type: ChatCompletionResponseEventType,
    pub delta: EventDelta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<Vec<TokenLogProbs>>,
    /// Only populated on the terminal `complete` event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
}

/// One item of a streamed chat completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponseStreamChunk {
    pub event: ChatCompletionResponseEvent,
}

impl ChatCompletionResponseStreamChunk {
    pub fn event_type(&self) -> ChatCompletionResponseEventType {
        self.event.event_type
    }
}
