//! # stack-nvidia-adapter
//!
//! Translation between the stack chat-completion schema and the OpenAI-compatible schema
//! served by NVIDIA NIM, plus the build configuration tooling behind `stack-cli api configure`.
//!
//! ## Overview
//!
//! - **Request mapping**: [`adapter::convert_chat_completion_request`] turns a
//!   [`types::ChatCompletionRequest`] into a typed [`types::openai::ProviderRequest`],
//!   routing `top_k` and `repetition_penalty` through the `nvext` extension bag.
//! - **Response mapping**: [`adapter::convert_chat_completion_choice`] maps one provider
//!   choice to a [`types::ChatCompletionResponse`].
//! - **Stream mapping**: [`adapter::convert_chat_completion_stream`] turns provider chunks into
//!   a `start` / `progress` / `complete` event stream.
//! - **Build config**: [`config`] loads, interactively updates and rewrites build YAML files.
//!
//! Degraded-fidelity cases (an out-of-range `top_k`, several tool calls in one delta) never
//! abort a conversion; they are logged and recorded in an [`adapter::Advisories`] collector.
//!
//! ## Quick Start
//!
//! ```rust
//! use stack_nvidia_adapter::adapter::{convert_chat_completion_request, Advisories};
//! use stack_nvidia_adapter::defaults::DEFAULT_N;
//! use stack_nvidia_adapter::types::{ChatCompletionRequest, Message, SamplingParams};
//!
//! let request = ChatCompletionRequest::new("meta/llama3-8b-instruct", vec![Message::user("Hi")])
//!     .sampling_params(SamplingParams::top_k(40));
//!
//! let advisories = Advisories::new();
//! let payload = convert_chat_completion_request(&request, DEFAULT_N, &advisories);
//! assert_eq!(payload.extra_body.nvext.top_k, Some(40));
//! assert!(advisories.is_empty());
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapter`] | Request, response and stream translation |
//! | [`types`] | Stack and provider schema types |
//! | [`config`] | Build configuration files and provider prompts |
//! | [`defaults`] | Fixed header values and paths |

pub mod adapter;
pub mod config;
pub mod defaults;
pub mod types;

pub use adapter::{
    convert_chat_completion, convert_chat_completion_choice, convert_chat_completion_request,
    convert_chat_completion_stream, Advisories, Advisory,
};
pub use types::{
    events::ChatCompletionResponseStreamChunk,
    message::{Message, Role, StopReason},
    request::ChatCompletionRequest,
    response::ChatCompletionResponse,
    tool::ToolCall,
};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
