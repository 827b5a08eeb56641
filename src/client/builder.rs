use crate::client::core::ProviderClient;
use crate::config::Settings;
use crate::drivers::create_driver;
use crate::error::{Error, ErrorContext};
use crate::transport::HttpTransport;
use crate::{Provider, Result};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Builder for a [`ProviderClient`].
///
/// Keep this surface area small and predictable.
#[derive(Debug, Clone)]
pub struct ProviderClientBuilder {
    provider: Provider,
    api_key: Option<String>,
    model: Option<String>,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
    timeout: Duration,
    proxy_url: Option<String>,
}

impl ProviderClientBuilder {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            api_key: None,
            model: None,
            base_url_override: None,
            timeout: DEFAULT_TIMEOUT,
            proxy_url: None,
        }
    }

    /// Start from the environment-derived settings for `provider`.
    pub fn from_settings(settings: &Settings, provider: Provider) -> Self {
        let p = settings.provider(provider);
        Self {
            provider,
            api_key: p.api_key.clone(),
            model: Some(p.model.clone()),
            base_url_override: Some(p.base_url.clone()),
            timeout: settings.timeout,
            proxy_url: settings.proxy_url.clone(),
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    /// Fails with a configuration error when no API key was supplied.
    pub fn build(self) -> Result<ProviderClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    format!(
                        "{} not found in environment variables",
                        self.provider.api_key_var()
                    ),
                    ErrorContext::new()
                        .with_field_path(self.provider.api_key_var())
                        .with_source("client_builder"),
                )
            })?;

        let transport = HttpTransport::new(self.timeout, self.proxy_url.as_deref())
            .map_err(|source| Error::Transport {
                provider: self.provider,
                source,
            })?;

        Ok(ProviderClient {
            driver: create_driver(self.provider),
            transport,
            api_key,
            base_url: self
                .base_url_override
                .unwrap_or_else(|| self.provider.default_base_url().to_string()),
            model: self
                .model
                .unwrap_or_else(|| self.provider.default_model().to_string()),
        })
    }
}
