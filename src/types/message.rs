//! Stack-schema chat messages

use serde::{Deserialize, Serialize};

use super::tool::ToolCall;

/// Stack chat message.
///
/// The stack schema has one message shape per role; they are flattened here into a single
/// struct whose role-specific fields are optional and omitted from the wire when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
    /// Set on assistant (completion) messages only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    /// Set on ipython (tool response) messages only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl Message {
    fn with_role(role: Role, content: MessageContent) -> Self {
        Self {
            role,
            content,
            stop_reason: None,
            tool_calls: None,
            call_id: None,
            tool_name: None,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::with_role(Role::System, MessageContent::Text(text.into()))
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::with_role(Role::User, MessageContent::Text(text.into()))
    }

    /// Assistant turn as produced by a previous completion.
    pub fn completion(
        text: impl Into<String>,
        stop_reason: StopReason,
        tool_calls: Vec<ToolCall>,
    ) -> Self {
        Self {
            stop_reason: Some(stop_reason),
            tool_calls: Some(tool_calls),
            ..Self::with_role(Role::Assistant, MessageContent::Text(text.into()))
        }
    }

    /// Result of a tool invocation fed back to the model.
    pub fn tool_response(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            call_id: Some(call_id.into()),
            tool_name: Some(tool_name.into()),
            ..Self::with_role(Role::Ipython, MessageContent::Text(text.into()))
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    /// Tool responses; called "tool" on the provider side.
    Ipython,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Ipython => "ipython",
        }
    }
}

/// Message content (a plain string, a single media item, or a list of both)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Media(ImageMedia),
    Items(Vec<ContentItem>),
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for MessageContent {
    fn from(value: &str) -> Self {
        MessageContent::Text(value.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(value: String) -> Self {
        MessageContent::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentItem {
    Text(String),
    Media(ImageMedia),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMedia {
    pub image: ImageUrl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub uri: String,
}

/// Why the model stopped producing tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndOfTurn,
    EndOfMessage,
    OutOfTokens,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::EndOfTurn => "end_of_turn",
            StopReason::EndOfMessage => "end_of_message",
            StopReason::OutOfTokens => "out_of_tokens",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_response_serializes_role_specific_fields() {
        let msg = Message::tool_response("c1", "get_weather", "sunny");
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            v,
            json!({
                "role": "ipython",
                "content": "sunny",
                "call_id": "c1",
                "tool_name": "get_weather"
            })
        );
    }

    #[test]
    fn test_content_variants_deserialize() {
        let text: MessageContent = serde_json::from_value(json!("hi")).unwrap();
        assert_eq!(text.as_text(), Some("hi"));

        let media: MessageContent =
            serde_json::from_value(json!({"image": {"uri": "https://x/y.png"}})).unwrap();
        assert!(matches!(media, MessageContent::Media(_)));

        let items: MessageContent =
            serde_json::from_value(json!(["look", {"image": {"uri": "file:///a.png"}}])).unwrap();
        match items {
            MessageContent::Items(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0], ContentItem::Text("look".into()));
            }
            other => panic!("expected items, got {:?}", other),
        }
    }

    #[test]
    fn test_stop_reason_wire_names() {
        for reason in [
            StopReason::EndOfTurn,
            StopReason::EndOfMessage,
            StopReason::OutOfTokens,
        ] {
            assert_eq!(serde_json::to_value(reason).unwrap(), json!(reason.as_str()));
        }
    }
}
