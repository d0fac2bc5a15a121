//! Provider response -> stack response

use serde_json::{Map, Value};

use crate::error::{Error, ErrorContext};
use crate::types::message::StopReason;
use crate::types::openai::{ChatCompletion, Choice, ChoiceLogprobs, ToolCallRecord};
use crate::types::response::{ChatCompletionResponse, CompletionMessage, TokenLogProbs};
use crate::types::tool::ToolCall;
use crate::Result;

/// Map an OpenAI `finish_reason` to a stack [`StopReason`].
///
/// | finish_reason | StopReason       |
/// |---------------|------------------|
/// | `stop`        | `end_of_turn`    |
/// | `length`      | `out_of_tokens`  |
/// | `tool_calls`  | `end_of_message` |
/// | anything else | `end_of_turn`    |
pub fn convert_finish_reason(finish_reason: Option<&str>) -> StopReason {
    match finish_reason {
        Some("length") => StopReason::OutOfTokens,
        Some("tool_calls") => StopReason::EndOfMessage,
        _ => StopReason::EndOfTurn,
    }
}

/// Convert provider tool calls, parsing each JSON-encoded `arguments` string.
///
/// Absent and empty input both yield an empty list. The first call whose arguments are not a
/// JSON object fails the whole conversion.
pub fn convert_tool_calls<T: ToolCallRecord>(tool_calls: Option<&[T]>) -> Result<Vec<ToolCall>> {
    let Some(tool_calls) = tool_calls else {
        return Ok(Vec::new());
    };

    tool_calls
        .iter()
        .map(|call| {
            let arguments: Map<String, Value> = serde_json::from_str(call.raw_arguments())
                .map_err(|source| Error::ToolArguments {
                    call_id: call.call_id().to_string(),
                    source,
                })?;
            Ok(ToolCall {
                call_id: call.call_id().to_string(),
                tool_name: call.function_name().to_string(),
                arguments,
            })
        })
        .collect()
}

/// Flatten provider log-probabilities into one [`TokenLogProbs`] per output position.
///
/// Each record holds that position's top alternatives. The selected token is only present if
/// the provider also listed it among the alternatives.
pub fn convert_logprobs(logprobs: Option<&ChoiceLogprobs>) -> Option<Vec<TokenLogProbs>> {
    let logprobs = logprobs?;
    let content = logprobs.content.as_deref().unwrap_or_default();

    Some(
        content
            .iter()
            .map(|position| TokenLogProbs {
                logprobs_by_token: position
                    .top_logprobs
                    .iter()
                    .map(|alt| (alt.token.clone(), alt.logprob))
                    .collect(),
            })
            .collect(),
    )
}

/// Convert one non-streaming choice into a stack response.
///
/// A choice without a message or without a finish reason is a broken upstream response and
/// is reported as [`Error::MalformedResponse`].
pub fn convert_chat_completion_choice(choice: &Choice) -> Result<ChatCompletionResponse> {
    let message = choice.message.as_ref().ok_or_else(|| {
        Error::malformed_response(
            "message not found",
            ErrorContext::new()
                .with_field_path(format!("choices[{}].message", choice.index))
                .with_source("choice_mapper"),
        )
    })?;
    let finish_reason = choice
        .finish_reason
        .as_deref()
        .filter(|r| !r.is_empty())
        .ok_or_else(|| {
            Error::malformed_response(
                "finish_reason not found",
                ErrorContext::new()
                    .with_field_path(format!("choices[{}].finish_reason", choice.index))
                    .with_source("choice_mapper"),
            )
        })?;

    Ok(ChatCompletionResponse {
        completion_message: CompletionMessage::new(
            message.content.clone().unwrap_or_default(),
            convert_finish_reason(Some(finish_reason)),
            convert_tool_calls(message.tool_calls.as_deref())?,
        ),
        logprobs: convert_logprobs(choice.logprobs.as_ref()),
    })
}

/// Convert a complete non-streaming response; only the first choice is used.
pub fn convert_chat_completion(completion: &ChatCompletion) -> Result<ChatCompletionResponse> {
    let choice = completion.choices.first().ok_or_else(|| {
        Error::malformed_response(
            "no choices in response",
            ErrorContext::new()
                .with_field_path("choices")
                .with_details(format!("completion id '{}'", completion.id))
                .with_source("choice_mapper"),
        )
    })?;
    convert_chat_completion_choice(choice)
}
