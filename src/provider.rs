use clap::ValueEnum;
use std::fmt;

/// One of the two model providers py2cpp can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// OpenAI chat completions.
    Gpt,
    /// Anthropic messages.
    Claude,
}

impl Provider {
    pub fn id(&self) -> &'static str {
        match self {
            Provider::Gpt => "gpt",
            Provider::Claude => "claude",
        }
    }

    /// Environment variable that carries the API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::Gpt => "OPENAI_API_KEY",
            Provider::Claude => "ANTHROPIC_API_KEY",
        }
    }

    /// Environment variable that overrides the default model.
    pub fn model_var(&self) -> &'static str {
        match self {
            Provider::Gpt => "OPENAI_MODEL",
            Provider::Claude => "ANTHROPIC_MODEL",
        }
    }

    /// Environment variable that overrides the API base URL (mock servers, gateways).
    pub fn base_url_var(&self) -> &'static str {
        match self {
            Provider::Gpt => "OPENAI_BASE_URL",
            Provider::Claude => "ANTHROPIC_BASE_URL",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gpt => "gpt-4o",
            Provider::Claude => "claude-3-5-sonnet-20240620",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Gpt => "https://api.openai.com",
            Provider::Claude => "https://api.anthropic.com",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Which providers a run should call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModelSelection {
    #[default]
    Gpt,
    Claude,
    Both,
}

impl ModelSelection {
    /// Providers in call order. `Both` always calls GPT first.
    pub fn providers(&self) -> &'static [Provider] {
        match self {
            ModelSelection::Gpt => &[Provider::Gpt],
            ModelSelection::Claude => &[Provider::Claude],
            ModelSelection::Both => &[Provider::Gpt, Provider::Claude],
        }
    }
}
