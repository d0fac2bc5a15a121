//! Stack-schema chat completion request

use serde::{Deserialize, Serialize};

use super::message::Message;
use super::tool::{ToolChoice, ToolDefinition};

/// Stack chat completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_params: Option<SamplingParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<LogProbConfig>,
    #[serde(default)]
    pub stream: bool,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            sampling_params: None,
            tools: None,
            tool_choice: None,
            logprobs: None,
            stream: false,
        }
    }

    pub fn sampling_params(mut self, params: SamplingParams) -> Self {
        self.sampling_params = Some(params);
        self
    }

    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn tool_choice(mut self, choice: ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }

    pub fn logprobs(mut self, top_k: u32) -> Self {
        self.logprobs = Some(LogProbConfig { top_k: Some(top_k) });
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }
}

/// Sampling controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    #[serde(default)]
    pub strategy: SamplingStrategy,
    #[serde(default = "default_temperature")]
    pub temperature: Option<f64>,
    #[serde(default = "default_top_p")]
    pub top_p: Option<f64>,
    #[serde(default = "default_top_k")]
    pub top_k: Option<i64>,
    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: Option<f64>,
    /// `None` and `Some(0)` both mean "provider default".
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> Option<f64> {
    Some(0.0)
}

fn default_top_k() -> Option<i64> {
    Some(0)
}

fn default_top_p() -> Option<f64> {
    Some(0.95)
}

fn default_repetition_penalty() -> Option<f64> {
    Some(1.0)
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            strategy: SamplingStrategy::Greedy,
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            repetition_penalty: default_repetition_penalty(),
            max_tokens: None,
        }
    }
}

impl SamplingParams {
    pub fn greedy(temperature: f64) -> Self {
        Self {
            strategy: SamplingStrategy::Greedy,
            temperature: Some(temperature),
            ..Self::default()
        }
    }

    pub fn top_p(top_p: f64) -> Self {
        Self {
            strategy: SamplingStrategy::TopP,
            top_p: Some(top_p),
            ..Self::default()
        }
    }

    pub fn top_k(top_k: i64) -> Self {
        Self {
            strategy: SamplingStrategy::TopK,
            top_k: Some(top_k),
            ..Self::default()
        }
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn repetition_penalty(mut self, penalty: f64) -> Self {
        self.repetition_penalty = Some(penalty);
        self
    }
}

/// Sampling strategy.
///
/// Unknown strategy names are kept verbatim rather than rejected; the request mapper
/// forwards no strategy-specific fields for them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SamplingStrategy {
    #[default]
    Greedy,
    TopP,
    TopK,
    Other(String),
}

impl SamplingStrategy {
    pub fn as_str(&self) -> &str {
        match self {
            SamplingStrategy::Greedy => "greedy",
            SamplingStrategy::TopP => "top_p",
            SamplingStrategy::TopK => "top_k",
            SamplingStrategy::Other(s) => s,
        }
    }
}

impl From<String> for SamplingStrategy {
    fn from(value: String) -> Self {
        match value.as_str() {
            "greedy" => SamplingStrategy::Greedy,
            "top_p" => SamplingStrategy::TopP,
            "top_k" => SamplingStrategy::TopK,
            _ => SamplingStrategy::Other(value),
        }
    }
}

impl From<SamplingStrategy> for String {
    fn from(value: SamplingStrategy) -> Self {
        value.as_str().to_string()
    }
}

/// Log-probability request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogProbConfig {
    #[serde(default)]
    pub top_k: Option<u32>,
}
