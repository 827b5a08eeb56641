use crate::error_code::ProviderErrorKind;
use crate::transport::TransportError;
use crate::Provider;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "OPENAI_API_KEY", "--file")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "settings", "input_resolver")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
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
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for py2cpp.
/// Every failure terminates the run; nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Input error: {message}{}", format_context(.context))]
    Input {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("{provider} transport error: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: TransportError,
    },

    #[error("{provider} returned HTTP {status} ({kind}): {message}")]
    Remote {
        provider: Provider,
        status: u16,
        kind: ProviderErrorKind,
        message: String,
    },

    #[error("{provider} returned an empty or malformed response: {message}")]
    EmptyResponse { provider: Provider, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new input error with structured context
    pub fn input_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Input {
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

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Input { context, .. } | Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    /// The provider involved, for errors raised while talking to one.
    pub fn provider(&self) -> Option<Provider> {
        match self {
            Error::Transport { provider, .. }
            | Error::Remote { provider, .. }
            | Error::EmptyResponse { provider, .. } => Some(*provider),
            _ => None,
        }
    }

    /// True for failures of the provider exchange itself (network, status, payload).
    pub fn is_provider_error(&self) -> bool {
        self.provider().is_some()
    }
}
