use thiserror::Error;

/// Where in a provider response or build file an error was detected.
///
/// Rendered after the message as `(field: .., details: .., source: ..)`, skipping unset parts.
/// The mappers use `choices[N].message` / `choices[N].finish_reason` with source
/// `choice_mapper`; config loading reports the file path as details with source
/// `package_config`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Dotted or indexed path into the offending document, e.g. `choices[0].finish_reason` or `api`
    pub field_path: Option<String>,
    /// Free-form detail such as the allowed values or the file path
    pub details: Option<String>,
    /// Component that raised the error
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.field_path.is_none() && self.details.is_none() && self.source.is_none()
    }
}

/// Unified error type for the adapter and the configuration tooling
#[derive(Debug, Error)]
pub enum Error {
    /// The provider violated its response contract (missing message, finish reason, choices).
    #[error("error in server response: {message}{}", format_context(.context))]
    MalformedResponse {
        message: String,
        context: ErrorContext,
    },

    #[error("invalid tool call arguments for call '{call_id}': {source}")]
    ToolArguments {
        call_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failure reported by the upstream chunk source; passed through untouched.
    #[error("upstream stream error: {message}")]
    Upstream { message: String },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    if ctx.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = [
        ("field", &ctx.field_path),
        ("details", &ctx.details),
        ("source", &ctx.source),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_ref().map(|v| format!("{}: {}", label, v)))
    .collect();
    format!(" ({})", parts.join(", "))
}

impl Error {
    /// Create a malformed-response error with structured context
    pub fn malformed_response(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::MalformedResponse {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Error::Upstream {
            message: msg.into(),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::MalformedResponse { context, .. }
            | Error::Configuration { context, .. }
            | Error::Validation { context, .. } => Some(context),
            _ => None,
        }
    }
}
