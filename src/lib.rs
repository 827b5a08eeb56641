//! # py2cpp
//!
//! Sends Python source code to GPT (OpenAI chat completions) and/or Claude
//! (Anthropic messages), asking for an optimized C++ rewrite, and writes each
//! provider's answer to its own file.
//!
//! No parsing, compilation or verification happens here: the models do the
//! translation and the returned text is saved as-is.
//!
//! ## Flow
//!
//! [`input::SourceInput`] → [`prompt::Prompt`] → [`client::ProviderClient`]
//! (one per selected provider, called in order) → [`output::OutputWriter`].
//!
//! ```rust,no_run
//! use py2cpp::config::Settings;
//! use py2cpp::input::SourceInput;
//! use py2cpp::output::OutputWriter;
//! use py2cpp::runner::{translate, TranslateRequest};
//! use py2cpp::ModelSelection;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> py2cpp::Result<()> {
//!     let settings = Settings::from_env()?;
//!     let request = TranslateRequest {
//!         source: SourceInput::from_file("programs/pi.py")?,
//!         selection: ModelSelection::Both,
//!         max_tokens: 2000,
//!     };
//!     for artifact in translate(&settings, OutputWriter::new("output"), &request).await? {
//!         println!("{}", artifact.path.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`input`] | Source file / inline code / sample program resolution |
//! | [`prompt`] | Fixed translation instructions |
//! | [`drivers`] | OpenAI and Anthropic request/response formats |
//! | [`transport`] | HTTP transport |
//! | [`client`] | Provider client and builder |
//! | [`output`] | Per-provider output files |
//! | [`runner`] | End-to-end translation run |
//! | [`config`] | Environment-derived settings |
//! | [`cli`] | Command-line arguments and logging setup |

pub mod cli;
pub mod client;
pub mod config;
pub mod drivers;
pub mod error_code;
pub mod input;
pub mod output;
pub mod prompt;
pub mod provider;
pub mod runner;
pub mod transport;
pub mod types;

pub use client::{ProviderClient, ProviderClientBuilder};
pub use provider::{ModelSelection, Provider};
pub use types::{Artifact, Message, MessageRole, ProviderResponse};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
