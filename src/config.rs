//! Runtime settings read from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `OPENAI_API_KEY` / `ANTHROPIC_API_KEY` | - | required for the selected provider |
//! | `OPENAI_MODEL` / `ANTHROPIC_MODEL` | `gpt-4o` / `claude-3-5-sonnet-20240620` | model id |
//! | `OPENAI_BASE_URL` / `ANTHROPIC_BASE_URL` | public API hosts | base URL override |
//! | `AI_HTTP_TIMEOUT_SECS` | 120 | whole-request timeout |
//! | `AI_PROXY_URL` | - | proxy for all requests |
//!
//! Values are read through a lookup function so tests never touch the
//! process environment.

use crate::error::{Error, ErrorContext};
use crate::{Provider, Result};
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection details for one provider. `api_key` is `None` when unset.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl ProviderSettings {
    /// The API key, or a configuration error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            Error::configuration_with_context(
                format!(
                    "{} not found in environment variables",
                    self.provider.api_key_var()
                ),
                ErrorContext::new()
                    .with_field_path(self.provider.api_key_var())
                    .with_details(format!("required for --model {}", self.provider))
                    .with_source("settings"),
            )
        })
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub gpt: ProviderSettings,
    pub claude: ProviderSettings,
    pub timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let provider = |p: Provider| -> Result<ProviderSettings> {
            let base_url = match get(p.base_url_var()) {
                Some(raw) => validate_base_url(p.base_url_var(), &raw)?,
                None => p.default_base_url().to_string(),
            };
            Ok(ProviderSettings {
                provider: p,
                api_key: get(p.api_key_var()),
                model: get(p.model_var()).unwrap_or_else(|| p.default_model().to_string()),
                base_url,
            })
        };

        let timeout_secs = match get("AI_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                Error::configuration_with_context(
                    "timeout must be a positive number of seconds",
                    ErrorContext::new()
                        .with_field_path("AI_HTTP_TIMEOUT_SECS")
                        .with_details(format!("got '{raw}'"))
                        .with_source("settings"),
                )
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            gpt: provider(Provider::Gpt)?,
            claude: provider(Provider::Claude)?,
            timeout: Duration::from_secs(timeout_secs),
            proxy_url: get("AI_PROXY_URL"),
        })
    }

    pub fn provider(&self, provider: Provider) -> &ProviderSettings {
        match provider {
            Provider::Gpt => &self.gpt,
            Provider::Claude => &self.claude,
        }
    }
}

/// Parse a base URL and drop any trailing slash so endpoint paths join cleanly.
fn validate_base_url(var: &str, raw: &str) -> Result<String> {
    let url = Url::parse(raw).map_err(|e| {
        Error::configuration_with_context(
            format!("invalid base URL: {e}"),
            ErrorContext::new()
                .with_field_path(var)
                .with_details(format!("got '{raw}'"))
                .with_source("settings"),
        )
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::configuration_with_context(
            format!("unsupported URL scheme '{}'", url.scheme()),
            ErrorContext::new().with_field_path(var).with_source("settings"),
        ));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}
