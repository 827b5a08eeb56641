//! Provider failure classification.
//!
//! Maps the HTTP status (and, when present, the provider's own error type
//! string) of a failed request to a small set of failure kinds, so the user
//! sees "authentication" or "rate_limited" rather than a bare status code.
//!
//! ```rust
//! use py2cpp::error_code::ProviderErrorKind;
//!
//! let kind = ProviderErrorKind::from_http_status(401);
//! assert_eq!(kind.name(), "authentication");
//! assert_eq!(kind.category(), "client");
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    /// Malformed request or invalid parameters
    InvalidRequest,
    /// Invalid, expired, or missing API key
    Authentication,
    /// Valid credentials but insufficient permissions
    PermissionDenied,
    /// Unknown model or endpoint
    NotFound,
    /// Input exceeds the context window or payload limit
    RequestTooLarge,
    /// Request rate limit exceeded
    RateLimited,
    /// Account usage quota or billing limit reached
    QuotaExhausted,
    /// Internal server error on provider side
    ServerError,
    /// Provider service temporarily overloaded
    Overloaded,
    /// Provider gave up before responding
    Timeout,
    Unknown,
}

impl ProviderErrorKind {
    /// Returns the standard name (e.g., `"rate_limited"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Authentication => "authentication",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::RequestTooLarge => "request_too_large",
            Self::RateLimited => "rate_limited",
            Self::QuotaExhausted => "quota_exhausted",
            Self::ServerError => "server_error",
            Self::Overloaded => "overloaded",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the category: `"client"`, `"rate"`, `"server"`, or `"unknown"`.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidRequest
            | Self::Authentication
            | Self::PermissionDenied
            | Self::NotFound
            | Self::RequestTooLarge => "client",
            Self::RateLimited | Self::QuotaExhausted => "rate",
            Self::ServerError | Self::Overloaded | Self::Timeout => "server",
            Self::Unknown => "unknown",
        }
    }

    /// Maps a provider error type string (`error.type` for Anthropic,
    /// `error.code`/`error.type` for OpenAI) to a kind.
    pub fn from_provider_code(provider_code: &str) -> Option<Self> {
        let kind = match provider_code {
            "invalid_request" | "invalid_request_error" => Self::InvalidRequest,
            "invalid_api_key" | "authentication_error" => Self::Authentication,
            "permission_error" => Self::PermissionDenied,
            "not_found_error" | "model_not_found" => Self::NotFound,
            "request_too_large" | "context_length_exceeded" => Self::RequestTooLarge,
            "rate_limit_error" | "rate_limit_exceeded" => Self::RateLimited,
            "insufficient_quota" => Self::QuotaExhausted,
            "api_error" | "server_error" => Self::ServerError,
            "overloaded_error" => Self::Overloaded,
            _ => return None,
        };
        Some(kind)
    }

    /// Maps an HTTP status code to the most likely kind.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::InvalidRequest,
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            408 | 504 => Self::Timeout,
            413 => Self::RequestTooLarge,
            429 => Self::RateLimited, // Could also be QuotaExhausted; the body decides
            500 | 502 => Self::ServerError,
            503 | 529 => Self::Overloaded, // 529: Anthropic overloaded
            _ => Self::Unknown,
        }
    }

    /// Classify a failed response, preferring the provider's own error type
    /// from the JSON body over the status code.
    pub fn classify(status: u16, body: &str) -> Self {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                let err = v.get("error")?;
                err.get("code")
                    .and_then(|c| c.as_str())
                    .and_then(Self::from_provider_code)
                    .or_else(|| {
                        err.get("type")
                            .and_then(|t| t.as_str())
                            .and_then(Self::from_provider_code)
                    })
            })
            .unwrap_or_else(|| Self::from_http_status(status))
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
