//! Writes provider output to fixed per-provider files.

use crate::error::Error;
use crate::types::Artifact;
use crate::{Provider, Result};
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::debug;

/// Writes translations under one output directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
    strip_fences: bool,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            strip_fences: false,
        }
    }

    /// Remove a Markdown code fence wrapping the whole response before writing.
    pub fn strip_fences(mut self, enable: bool) -> Self {
        self.strip_fences = enable;
        self
    }

    /// `<dir>/optimized_<provider>.cpp`
    pub fn path_for(&self, provider: Provider) -> PathBuf {
        self.dir.join(format!("optimized_{}.cpp", provider.id()))
    }

    /// Write `text` for `provider`, creating the directory if needed.
    /// Without fence stripping the file holds `text` byte-for-byte.
    /// Nothing is written when the contents left to write are blank.
    pub fn write(&self, provider: Provider, text: &str) -> Result<Artifact> {
        let contents = if self.strip_fences {
            strip_code_fence(text)
        } else {
            text
        };
        if contents.trim().is_empty() {
            return Err(Error::EmptyResponse {
                provider,
                message: "no code left to write".into(),
            });
        }

        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(provider);
        std::fs::write(&path, contents.as_bytes())?;
        debug!(provider = %provider, path = %path.display(), bytes = contents.len(), "wrote translation");

        Ok(Artifact {
            provider,
            path,
            bytes: contents.len(),
        })
    }
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)\A\s*```[A-Za-z0-9_+-]*[ \t]*\r?\n(.*?)\r?\n?```\s*\z")
            .expect("fence pattern is valid")
    })
}

/// Body of a single fenced block spanning the whole text; otherwise `text` unchanged.
pub fn strip_code_fence(text: &str) -> &str {
    match fence_regex().captures(text).and_then(|c| c.get(1)) {
        Some(body) if !body.as_str().contains("```") => body.as_str(),
        _ => text,
    }
}
