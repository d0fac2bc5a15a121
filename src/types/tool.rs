//! Stack-schema tool calling types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Tool definition advertised to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub tool_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, ToolParamDefinition>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParamDefinition {
    pub param_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

fn default_required() -> bool {
    true
}

/// Whether the model may or must call a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    Auto,
    Required,
}

impl ToolChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolChoice::Auto => "auto",
            ToolChoice::Required => "required",
        }
    }
}

/// Tool call (invocation from model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub call_id: String,
    pub tool_name: String,
    pub arguments: Map<String, Value>,
}

/// Incremental tool call carried by a stream event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallDelta {
    pub content: ToolCallDeltaContent,
    pub parse_status: ToolCallParseStatus,
}

impl ToolCallDelta {
    /// A fully formed call; nothing left to parse.
    pub fn complete(call: ToolCall) -> Self {
        Self {
            content: ToolCallDeltaContent::ToolCall(call),
            parse_status: ToolCallParseStatus::Success,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolCallDeltaContent {
    Text(String),
    ToolCall(ToolCall),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCallParseStatus {
    Started,
    InProgress,
    Failure,
    Success,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_param_required_defaults_to_true() {
        let def: ToolDefinition = serde_json::from_value(json!({
            "tool_name": "get_weather",
            "parameters": {"city": {"param_type": "string"}}
        }))
        .unwrap();
        let params = def.parameters.unwrap();
        assert!(params["city"].required);
        assert!(def.description.is_none());
    }

    #[test]
    fn test_complete_delta_shape() {
        let delta = ToolCallDelta::complete(ToolCall {
            call_id: "1".into(),
            tool_name: "f".into(),
            arguments: Map::new(),
        });
        assert_eq!(
            serde_json::to_value(&delta).unwrap(),
            json!({
                "content": {"call_id": "1", "tool_name": "f", "arguments": {}},
                "parse_status": "success"
            })
        );
    }
}
