//! Stack-schema completion responses

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::message::{Role, StopReason};
use super::tool::ToolCall;

/// Assistant message produced by a completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: Role,
    pub content: String,
    pub stop_reason: StopReason,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

impl CompletionMessage {
    pub fn new(content: impl Into<String>, stop_reason: StopReason, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            stop_reason,
            tool_calls,
        }
    }
}

/// Log-probabilities for one output position, keyed by token
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenLogProbs {
    pub logprobs_by_token: BTreeMap<String, f64>,
}

/// Non-streaming chat completion result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub completion_message: CompletionMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<Vec<TokenLogProbs>>,
}
