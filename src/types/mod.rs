//! Type definitions for both sides of the adapter.
//!
//! # Types Module
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`message`] | Stack messages, roles and stop reasons |
//! | [`tool`] | Tool definitions, calls and stream deltas |
//! | [`request`] | Stack chat completion request and sampling parameters |
//! | [`response`] | Stack completion response and log-probabilities |
//! | [`events`] | Stack streaming events |
//! | [`openai`] | OpenAI-compatible (NIM) request payload, responses and chunks |
//!
//! ## Example
//!
//! ```rust
//! use stack_nvidia_adapter::types::{ChatCompletionRequest, Message, SamplingParams};
//!
//! let request = ChatCompletionRequest::new(
//!     "meta/llama3-8b-instruct",
//!     vec![Message::system("You are terse."), Message::user("Hello")],
//! )
//! .sampling_params(SamplingParams::top_p(0.9).max_tokens(128))
//! .stream(true);
//! assert!(request.stream);
//! ```

pub mod events;
pub mod message;
pub mod openai;
pub mod request;
pub mod response;
pub mod tool;

pub use events::{
    ChatCompletionResponseEvent, ChatCompletionResponseEventType, ChatCompletionResponseStreamChunk,
    EventDelta,
};
pub use message::{Message, MessageContent, Role, StopReason};
pub use request::{ChatCompletionRequest, LogProbConfig, SamplingParams, SamplingStrategy};
pub use response::{ChatCompletionResponse, CompletionMessage, TokenLogProbs};
pub use tool::{
    ToolCall, ToolCallDelta, ToolCallDeltaContent, ToolCallParseStatus, ToolChoice,
    ToolDefinition,
};
