//! Stack <-> OpenAI-compatible (NVIDIA NIM) translation.
//!
//! # Adapter Layer
//!
//! Pure functions that reshape payloads between the stack chat-completion schema and the
//! provider schema. Nothing here performs I/O; the HTTP client and the chunk source belong
//! to the caller.
//!
//! ```text
//! ChatCompletionRequest ──request──▶ ProviderRequest ──▶ (transport)
//!
//! Choice ──────────────response──▶ ChatCompletionResponse
//! Stream<ChatCompletionChunk> ──stream──▶ Stream<ChatCompletionResponseStreamChunk>
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`request`] | Request and message mapping |
//! | [`response`] | Finish reason, tool call, logprob and choice mapping |
//! | [`stream`] | Streaming chunk to event translation |
//! | [`advisory`] | Non-fatal degraded-fidelity notices |

pub mod advisory;
pub mod request;
pub mod response;
pub mod stream;

pub use advisory::{Advisories, Advisory};
pub use request::{convert_chat_completion_request, convert_message};
pub use response::{
    convert_chat_completion, convert_chat_completion_choice, convert_finish_reason,
    convert_logprobs, convert_tool_calls,
};
pub use stream::{convert_chat_completion_stream, StreamPhase};
