//! Command-line surface of the `py2cpp` binary.

use crate::input::SourceInput;
use crate::output::OutputWriter;
use crate::runner::{TranslateRequest, DEFAULT_MAX_TOKENS};
use crate::{ModelSelection, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "py2cpp", version)]
#[command(about = "Rewrite Python code as optimized C++ using GPT and/or Claude")]
#[command(after_help = "ENVIRONMENT:\n    OPENAI_API_KEY       required for --model gpt|both\n    ANTHROPIC_API_KEY    required for --model claude|both")]
pub struct Cli {
    /// Python source file
    #[arg(
        short,
        long,
        value_name = "PATH",
        group = "source",
        required_unless_present_any = ["code", "program", "list_programs"]
    )]
    pub file: Option<PathBuf>,

    /// Python source passed inline
    #[arg(
        short,
        long,
        value_name = "CODE",
        group = "source",
        required_unless_present_any = ["file", "program", "list_programs"]
    )]
    pub code: Option<String>,

    /// Sample program name, loaded from <PROGRAMS_DIR>/<NAME>.py
    #[arg(
        short,
        long,
        value_name = "NAME",
        group = "source",
        required_unless_present_any = ["file", "code", "list_programs"]
    )]
    pub program: Option<String>,

    /// List available sample programs and exit
    #[arg(long, conflicts_with = "source")]
    pub list_programs: bool,

    /// Directory holding sample programs
    #[arg(long, value_name = "DIR", default_value = "programs")]
    pub programs_dir: PathBuf,

    /// Which provider(s) to ask
    #[arg(short, long, value_enum, default_value_t = ModelSelection::Gpt)]
    pub model: ModelSelection,

    /// Maximum tokens each provider may generate
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_TOKENS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_tokens: u32,

    /// Directory the generated C++ files are written to
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Remove a Markdown code fence wrapping the response before writing
    #[arg(long)]
    pub strip_fences: bool,

    /// Show debug logs
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve whichever input source was given.
    pub fn source(&self) -> Result<SourceInput> {
        match (&self.file, &self.code, &self.program) {
            (Some(path), _, _) => SourceInput::from_file(path),
            (None, Some(code), _) => SourceInput::inline(code.as_str()),
            (None, None, Some(name)) => SourceInput::from_program(&self.programs_dir, name),
            (None, None, None) => Err(crate::Error::input_with_context(
                "no input: pass --file, --code or --program",
                crate::ErrorContext::new().with_source("cli"),
            )),
        }
    }

    pub fn request(&self) -> Result<TranslateRequest> {
        Ok(TranslateRequest {
            source: self.source()?,
            selection: self.model,
            max_tokens: self.max_tokens,
        })
    }

    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(&self.output_dir).strip_fences(self.strip_fences)
    }

    /// Log filter: `RUST_LOG` when set, otherwise `info`, or `debug` with `--verbose`.
    pub fn log_filter(&self) -> EnvFilter {
        let default = if self.verbose { "debug" } else { "info" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    }
}

/// Install the stderr log subscriber. Safe to call more than once.
pub fn init_logging(cli: &Cli) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
