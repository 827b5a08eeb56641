//! Input → prompt → providers (in order) → output files.

use crate::client::{ProviderClient, ProviderClientBuilder};
use crate::config::Settings;
use crate::input::SourceInput;
use crate::output::OutputWriter;
use crate::prompt::Prompt;
use crate::types::Artifact;
use crate::{ModelSelection, Result};
use std::path::PathBuf;
use tracing::{info, warn};

pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// One translation job.
#[derive(Debug, Clone)]
pub struct TranslateRequest {
    pub source: SourceInput,
    pub selection: ModelSelection,
    pub max_tokens: u32,
}

#[derive(Debug)]
pub struct Runner {
    clients: Vec<ProviderClient>,
    writer: OutputWriter,
}

impl Runner {
    /// Build a client for every selected provider up front, so a missing API
    /// key fails the run before any request is sent.
    pub fn new(settings: &Settings, selection: ModelSelection, writer: OutputWriter) -> Result<Self> {
        let clients = selection
            .providers()
            .iter()
            .map(|&provider| {
                settings.provider(provider).require_api_key()?;
                ProviderClientBuilder::from_settings(settings, provider).build()
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::with_clients(clients, writer))
    }

    /// Use pre-built clients, called in the given order.
    pub fn with_clients(clients: Vec<ProviderClient>, writer: OutputWriter) -> Self {
        Self { clients, writer }
    }

    /// Call each provider in turn and write its output as soon as it arrives.
    ///
    /// The first failure ends the run; files already written for earlier
    /// providers stay on disk.
    pub async fn run(&self, source: &SourceInput, max_tokens: u32) -> Result<Vec<Artifact>> {
        let prompt = Prompt::for_source(source);
        info!(
            origin = %source.origin(),
            bytes = source.code().len(),
            providers = self.clients.len(),
            "translating python source"
        );

        let mut artifacts = Vec::with_capacity(self.clients.len());
        for (i, client) in self.clients.iter().enumerate() {
            info!(provider = %client.provider(), model = client.model(), "requesting translation");
            let outcome = match client.complete(&prompt, max_tokens).await {
                Ok(response) => self.writer.write(response.provider, &response.text),
                Err(e) => Err(e),
            };
            let artifact = match outcome {
                Ok(artifact) => artifact,
                Err(e) => {
                    for path in self.stale_outputs(i) {
                        warn!(
                            path = %path.display(),
                            "output from an earlier run was left in place"
                        );
                    }
                    return Err(e);
                }
            };
            info!(
                provider = %artifact.provider,
                path = %artifact.path.display(),
                bytes = artifact.bytes,
                "translation saved"
            );
            artifacts.push(artifact);
        }
        Ok(artifacts)
    }

    /// Existing output files for the providers from index `from` on, which
    /// this run did not get to overwrite.
    fn stale_outputs(&self, from: usize) -> Vec<PathBuf> {
        self.clients
            .iter()
            .skip(from)
            .map(|client| self.writer.path_for(client.provider()))
            .filter(|path| path.is_file())
            .collect()
    }
}

/// Resolve clients from `settings` and run `request`.
pub async fn translate(
    settings: &Settings,
    writer: OutputWriter,
    request: &TranslateRequest,
) -> Result<Vec<Artifact>> {
    let runner = Runner::new(settings, request.selection, writer)?;
    runner.run(&request.source, request.max_tokens).await
}
