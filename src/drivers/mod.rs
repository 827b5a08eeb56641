//! Provider drivers: request/response shape for each provider's HTTP API.
//!
//! A driver only translates between the provider-neutral [`Message`] list and
//! the provider's JSON; it performs no I/O. [`crate::client::ProviderClient`]
//! pairs a driver with the HTTP transport.

pub mod anthropic;

use serde_json::Value;
use std::collections::HashMap;

use crate::error::Error;
use crate::types::{FinishReason, Message, UsageInfo};
use crate::Provider;

pub use anthropic::AnthropicDriver;

/// Provider HTTP request, relative to the provider's base URL.
#[derive(Debug, Clone)]
pub struct DriverRequest {
    /// Endpoint path (e.g. `/v1/chat/completions`).
    pub path: String,
    /// Request headers, excluding authentication.
    pub headers: HashMap<String, String>,
    /// JSON request body.
    pub body: Value,
}

/// Parsed provider response. `content` is `None` when the payload had no text.
#[derive(Debug, Clone)]
pub struct DriverResponse {
    pub content: Option<String>,
    pub finish_reason: Option<FinishReason>,
    pub usage: Option<UsageInfo>,
}

/// Per-provider API adaptation.
pub trait ProviderDriver: Send + Sync + std::fmt::Debug {
    fn provider(&self) -> Provider;

    /// Header name and value carrying the API key.
    fn auth_header(&self, api_key: &str) -> (String, String);

    /// Build a provider-specific request from neutral messages.
    fn build_request(
        &self,
        messages: &[Message],
        model: &str,
        max_tokens: u32,
    ) -> Result<DriverRequest, Error>;

    /// Parse a non-streaming response body.
    fn parse_response(&self, body: &Value) -> Result<DriverResponse, Error>;
}

/// OpenAI chat completions driver.
#[derive(Debug, Default)]
pub struct OpenAiDriver;

impl OpenAiDriver {
    pub fn new() -> Self {
        Self
    }
}

impl ProviderDriver for OpenAiDriver {
    fn provider(&self) -> Provider {
        Provider::Gpt
    }

    fn auth_header(&self, api_key: &str) -> (String, String) {
        ("authorization".into(), format!("Bearer {api_key}"))
    }

    fn build_request(
        &self,
        messages: &[Message],
        model: &str,
        max_tokens: u32,
    ) -> Result<DriverRequest, Error> {
        let oai_messages: Vec<Value> = messages
            .iter()
            .map(|m| serde_json::json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();

        let body = serde_json::json!({
            "model": model,
            "messages": oai_messages,
            "max_tokens": max_tokens,
        });

        Ok(DriverRequest {
            path: "/v1/chat/completions".into(),
            headers: HashMap::new(),
            body,
        })
    }

    fn parse_response(&self, body: &Value) -> Result<DriverResponse, Error> {
        let content = body
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .map(String::from);
        let finish_reason = body
            .pointer("/choices/0/finish_reason")
            .and_then(|v| v.as_str())
            .map(FinishReason::from_provider);
        let usage = body.get("usage").map(|u| UsageInfo {
            prompt_tokens: u["prompt_tokens"].as_u64().unwrap_or(0),
            completion_tokens: u["completion_tokens"].as_u64().unwrap_or(0),
            total_tokens: u["total_tokens"].as_u64().unwrap_or(0),
        });

        Ok(DriverResponse {
            content,
            finish_reason,
            usage,
        })
    }
}

/// Driver for a provider.
pub fn create_driver(provider: Provider) -> Box<dyn ProviderDriver> {
    match provider {
        Provider::Gpt => Box::new(OpenAiDriver::new()),
        Provider::Claude => Box::new(AnthropicDriver::new()),
    }
}
