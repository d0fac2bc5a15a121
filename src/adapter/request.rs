//! Stack request -> provider payload

use std::collections::BTreeMap;

use super::advisory::{Advisories, Advisory};
use crate::defaults::{TOP_K_DISABLED, USER_AGENT, USER_AGENT_HEADER};
use crate::types::message::{Message, Role};
use crate::types::openai::{ExtraBody, NvExt, ProviderMessage, ProviderRequest};
use crate::types::request::{ChatCompletionRequest, SamplingStrategy};

/// Convert a stack message to its provider representation.
///
/// `ipython` becomes `tool` and `stop_reason` is sent as its plain string value. Tool-call
/// fields are forwarded unchanged.
pub fn convert_message(message: &Message) -> ProviderMessage {
    let role = match message.role {
        Role::Ipython => "tool",
        other => other.as_str(),
    };

    ProviderMessage {
        role: role.to_string(),
        content: message.content.clone(),
        stop_reason: message.stop_reason.map(|r| r.as_str().to_string()),
        // TODO: translate stack tool calls into OpenAI `tool_calls` / `tool_call_id` fields.
        tool_calls: message.tool_calls.clone(),
        call_id: message.call_id.clone(),
        tool_name: message.tool_name.clone(),
    }
}

/// Convert a stack chat completion request into the provider payload.
///
/// Sampling strategy mapping:
/// - `greedy`: `nvext.top_k = -1`, `temperature` forwarded
/// - `top_p`: `nvext.top_k = -1`, `top_p` forwarded
/// - `top_k`: `nvext.top_k` forwarded as given
///
/// `repetition_penalty` always travels in `nvext`; the provider has no top-level field for it.
pub fn convert_chat_completion_request(
    request: &ChatCompletionRequest,
    n: u32,
    advisories: &Advisories,
) -> ProviderRequest {
    let mut nvext = NvExt::default();

    let mut payload = ProviderRequest {
        model: request.model.clone(),
        messages: request.messages.iter().map(convert_message).collect(),
        stream: request.stream,
        n,
        extra_body: ExtraBody::default(),
        extra_headers: BTreeMap::from([(USER_AGENT_HEADER.to_string(), USER_AGENT.to_string())]),
        tools: None,
        tool_choice: None,
        logprobs: None,
        top_logprobs: None,
        max_tokens: None,
        temperature: None,
        top_p: None,
    };

    if let Some(tools) = request.tools.as_ref().filter(|t| !t.is_empty()) {
        payload.tools = Some(tools.clone());
        // The server rejects tool_choice without tools.
        payload.tool_choice = request.tool_choice.map(|c| c.as_str().to_string());
    }

    if let Some(logprobs) = &request.logprobs {
        payload.logprobs = Some(true);
        payload.top_logprobs = logprobs.top_k;
    }

    if let Some(params) = &request.sampling_params {
        nvext.repetition_penalty = params.repetition_penalty;

        payload.max_tokens = params.max_tokens.filter(|&m| m > 0);

        match &params.strategy {
            SamplingStrategy::TopP => {
                nvext.top_k = Some(TOP_K_DISABLED);
                payload.top_p = params.top_p;
            }
            SamplingStrategy::TopK => {
                if let Some(top_k) = params.top_k {
                    if top_k != TOP_K_DISABLED && top_k < 1 {
                        advisories.record(Advisory::TopKOutOfRange { top_k });
                    }
                }
                nvext.top_k = params.top_k;
            }
            SamplingStrategy::Greedy => {
                nvext.top_k = Some(TOP_K_DISABLED);
                payload.temperature = params.temperature;
            }
            SamplingStrategy::Other(name) => {
                tracing::debug!(strategy = %name, "unrecognized sampling strategy, no override forwarded");
            }
        }
    }

    payload.extra_body.nvext = nvext;
    payload
}
