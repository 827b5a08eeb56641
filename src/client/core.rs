use crate::drivers::ProviderDriver;
use crate::error::Error;
use crate::error_code::ProviderErrorKind;
use crate::prompt::Prompt;
use crate::transport::HttpTransport;
use crate::types::ProviderResponse;
use crate::{Provider, Result};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Longest provider error body echoed back to the user.
const MAX_ERROR_BODY: usize = 500;

/// Thin client for one provider: a single blocking request/response per call.
pub struct ProviderClient {
    pub(crate) driver: Box<dyn ProviderDriver>,
    pub(crate) transport: HttpTransport,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) model: String,
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient")
            .field("provider", &self.provider())
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl ProviderClient {
    pub fn provider(&self) -> Provider {
        self.driver.provider()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` and return the provider's text unmodified.
    pub async fn complete(&self, prompt: &Prompt, max_tokens: u32) -> Result<ProviderResponse> {
        let provider = self.provider();
        let request = self
            .driver
            .build_request(&prompt.to_messages(), &self.model, max_tokens)?;

        let url = format!("{}{}", self.base_url, request.path);
        let mut headers = request.headers;
        let (auth_name, auth_value) = self.driver.auth_header(&self.api_key);
        headers.insert(auth_name, auth_value);

        debug!(provider = %provider, model = %self.model, url = %url, max_tokens, "sending translation request");
        let start = Instant::now();
        let reply = self
            .transport
            .post_json(&url, &headers, &request.body)
            .await
            .map_err(|source| Error::Transport { provider, source })?;

        if !reply.is_success() {
            let kind = ProviderErrorKind::classify(reply.status, &reply.body);
            info!(
                provider = %provider,
                http_status = reply.status,
                error_kind = kind.name(),
                duration_ms = start.elapsed().as_millis(),
                "provider request failed"
            );
            return Err(Error::Remote {
                provider,
                status: reply.status,
                kind,
                message: error_message(&reply.body),
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&reply.body).map_err(|e| Error::EmptyResponse {
                provider,
                message: format!("response is not JSON: {e}"),
            })?;
        let parsed = self.driver.parse_response(&json)?;

        let text = match parsed.content {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                return Err(Error::EmptyResponse {
                    provider,
                    message: "no text content in response".into(),
                })
            }
        };

        let usage = parsed.usage.unwrap_or_default();
        info!(
            provider = %provider,
            model = %self.model,
            http_status = reply.status,
            duration_ms = start.elapsed().as_millis(),
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "provider request succeeded"
        );
        if parsed.finish_reason.as_ref().is_some_and(|r| r.is_truncated()) {
            warn!(
                provider = %provider,
                max_tokens,
                "output hit the token limit and is probably incomplete; raise --max-tokens"
            );
        }

        Ok(ProviderResponse {
            provider,
            model: self.model.clone(),
            text,
            finish_reason: parsed.finish_reason,
            usage: parsed.usage,
        })
    }
}

/// Pull `error.message` out of a provider error body, else a trimmed raw body.
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(String::from)
        });
    match from_json {
        Some(msg) => msg,
        None => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "(empty body)".to_string()
            } else {
                trimmed.chars().take(MAX_ERROR_BODY).collect()
            }
        }
    }
}
