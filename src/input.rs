//! Input resolution: a Python file, an inline string, or a named sample program.

use crate::error::{Error, ErrorContext};
use crate::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a piece of source code came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    File(PathBuf),
    Inline,
    Program(String),
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceOrigin::File(p) => write!(f, "file {}", p.display()),
            SourceOrigin::Inline => f.write_str("inline code"),
            SourceOrigin::Program(name) => write!(f, "program '{name}'"),
        }
    }
}

/// Python source text. Never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    code: String,
    origin: SourceOrigin,
}

impl SourceInput {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let code = std::fs::read_to_string(path).map_err(|e| {
            Error::input_with_context(
                format!("cannot read {}: {e}", path.display()),
                ErrorContext::new()
                    .with_field_path("--file")
                    .with_source("input_resolver"),
            )
        })?;
        Self::new(code, SourceOrigin::File(path.to_path_buf()))
    }

    pub fn inline(code: impl Into<String>) -> Result<Self> {
        Self::new(code.into(), SourceOrigin::Inline)
    }

    /// Load `<dir>/<name>.py`, falling back to the built-in sample of the
    /// same name when no such file exists.
    pub fn from_program(dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        let path = dir.as_ref().join(format!("{name}.py"));
        let code = match std::fs::read_to_string(&path) {
            Ok(code) => code,
            Err(e) => match builtin_program(name) {
                Some(code) if e.kind() == std::io::ErrorKind::NotFound => code.to_string(),
                _ => {
                    return Err(Error::input_with_context(
                        format!("unknown program '{name}'"),
                        ErrorContext::new()
                            .with_field_path("--program")
                            .with_details(format!("{}: {e}", path.display()))
                            .with_source("input_resolver"),
                    ))
                }
            },
        };
        Self::new(code, SourceOrigin::Program(name.to_string()))
    }

    fn new(code: String, origin: SourceOrigin) -> Result<Self> {
        if code.trim().is_empty() {
            return Err(Error::input_with_context(
                format!("{origin} is empty"),
                ErrorContext::new().with_source("input_resolver"),
            ));
        }
        Ok(Self { code, origin })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn origin(&self) -> &SourceOrigin {
        &self.origin
    }
}

const FIBONACCI_NAME: &str = "fibonacci";

const FIBONACCI: &str = r#"def fibonacci(n):
    if n <= 1:
        return n
    return fibonacci(n-1) + fibonacci(n-2)

# Test the function
for i in range(10):
    print(f"fibonacci({i}) = {fibonacci(i)}")
"#;

fn builtin_program(name: &str) -> Option<&'static str> {
    (name == FIBONACCI_NAME).then_some(FIBONACCI)
}

/// A sample program selectable with `--program`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub name: String,
    pub description: String,
}

impl ProgramInfo {
    fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let description = describe_program(&name);
        Self { name, description }
    }
}

/// Human-readable description for a program name. Unknown names are
/// title-cased with underscores turned into spaces.
pub fn describe_program(name: &str) -> String {
    match name {
        "pi" => "Pi Calculation - High-performance numerical computation using series approximation".into(),
        "hard" => "Complex Algorithm - Maximum subarray sum with random number generation using LCG".into(),
        FIBONACCI_NAME => "Fibonacci Example - Naive recursive Fibonacci (built-in)".into(),
        other => other
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" "),
    }
}

/// The `*.py` sample programs in `dir`, sorted by name. When the directory is
/// missing or holds none, the built-in Fibonacci sample is listed instead.
pub fn list_programs(dir: impl AsRef<Path>) -> Result<Vec<ProgramInfo>> {
    let dir = dir.as_ref();
    let mut names: Vec<String> = if dir.is_dir() {
        std::fs::read_dir(dir)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("py"))
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect()
    } else {
        Vec::new()
    };
    if names.is_empty() {
        names.push(FIBONACCI_NAME.to_string());
    }
    names.sort();
    Ok(names.into_iter().map(ProgramInfo::new).collect())
}
