//! Anthropic Messages API driver. Differences from OpenAI:
//! - System messages are a top-level `system` parameter, not part of `messages`.
//! - Content uses typed blocks: `[{"type": "text", "text": "..."}]`.
//! - Response text lives in `content[*].text` instead of `choices[0].message.content`.
//! - Authentication is `x-api-key`, plus a mandatory `anthropic-version` header.

use serde_json::Value;
use std::collections::HashMap;

use crate::error::Error;
use crate::types::{FinishReason, Message, MessageRole, UsageInfo};
use crate::Provider;

use super::{DriverRequest, DriverResponse, ProviderDriver};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API driver.
#[derive(Debug, Default)]
pub struct AnthropicDriver;

impl AnthropicDriver {
    pub fn new() -> Self {
        Self
    }

    /// Extract system message and non-system messages separately.
    fn split_system_messages(messages: &[Message]) -> (Option<String>, Vec<Value>) {
        let mut system_parts: Vec<&str> = Vec::new();
        let mut turns: Vec<Value> = Vec::new();

        for m in messages {
            match m.role {
                MessageRole::System => system_parts.push(&m.content),
                MessageRole::User | MessageRole::Assistant => {
                    turns.push(serde_json::json!({
                        "role": m.role.as_str(),
                        "content": [{ "type": "text", "text": m.content }],
                    }));
                }
            }
        }

        let system = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };

        (system, turns)
    }
}

impl ProviderDriver for AnthropicDriver {
    fn provider(&self) -> Provider {
        Provider::Claude
    }

    fn auth_header(&self, api_key: &str) -> (String, String) {
        ("x-api-key".into(), api_key.to_string())
    }

    fn build_request(
        &self,
        messages: &[Message],
        model: &str,
        max_tokens: u32,
    ) -> Result<DriverRequest, Error> {
        let (system, msgs) = Self::split_system_messages(messages);

        let mut body = serde_json::json!({
            "model": model,
            "messages": msgs,
            "max_tokens": max_tokens,
        });
        if let Some(sys) = system {
            body["system"] = Value::String(sys);
        }

        let mut headers = HashMap::new();
        headers.insert("anthropic-version".into(), ANTHROPIC_VERSION.into());

        Ok(DriverRequest {
            path: "/v1/messages".into(),
            headers,
            body,
        })
    }

    fn parse_response(&self, body: &Value) -> Result<DriverResponse, Error> {
        // { content: [{type: "text", text: "..."}, ...], stop_reason, usage }
        let content = body.get("content").and_then(|c| c.as_array()).and_then(|blocks| {
            let texts: Vec<&str> = blocks
                .iter()
                .filter(|b| b.get("type").and_then(|t| t.as_str()) == Some("text"))
                .filter_map(|b| b.get("text").and_then(|t| t.as_str()))
                .collect();
            if texts.is_empty() {
                None
            } else {
                Some(texts.concat())
            }
        });

        let finish_reason = body
            .get("stop_reason")
            .and_then(|v| v.as_str())
            .map(FinishReason::from_provider);

        let usage = body.get("usage").map(|u| {
            let input = u["input_tokens"].as_u64().unwrap_or(0);
            let output = u["output_tokens"].as_u64().unwrap_or(0);
            UsageInfo {
                prompt_tokens: input,
                completion_tokens: output,
                total_tokens: input + output,
            }
        });

        Ok(DriverResponse {
            content,
            finish_reason,
            usage,
        })
    }
}
