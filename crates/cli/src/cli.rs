use crate::tracing::{LogLevel, TracingFormat};
use clap::{Parser, ValueEnum};
use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// The report contains findings and `--deny-findings` was given
pub const EXIT_FINDINGS: i32 = 1;
/// CLI or configuration error exit code
pub const EXIT_CLI: i32 = 2;
/// Task file could not be loaded or interpreted
pub const EXIT_INPUT: i32 = 3;

/// CLI-specific error types with exit code mapping
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// A file could not be read.
    #[error("failed to read {}", path.display())]
    #[diagnostic(
        code(tasklens::cli::file_read),
        help("Check the path and file permissions")
    )]
    FileRead {
        /// The path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The analyzer configuration file could not be read.
    #[error("failed to read configuration {}", path.display())]
    #[diagnostic(
        code(tasklens::cli::config_read),
        help("Check the --config path or TASKLENS_CONFIG")
    )]
    ConfigRead {
        /// The configuration path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The task file is not valid JSON.
    #[error("{} is not valid JSON: {message}", src.name())]
    #[diagnostic(code(tasklens::cli::json_parse))]
    JsonParse {
        /// Parser message.
        message: String,
        /// File contents.
        #[source_code]
        src: NamedSource<String>,
        /// Where parsing failed.
        #[label("parsing stopped here")]
        span: SourceSpan,
    },

    /// Analysis or configuration failed in the core.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Core(#[from] tasklens_core::Error),

    /// The report could not be written.
    #[error("failed to write report")]
    #[diagnostic(code(tasklens::cli::output))]
    Output {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl CliError {
    /// Build a [`CliError::JsonParse`] pointing at the parser's position.
    #[must_use]
    pub fn json_parse(name: impl AsRef<str>, contents: String, err: &serde_json::Error) -> Self {
        let offset = byte_offset(&contents, err.line(), err.column());
        let len = usize::from(offset < contents.len());
        Self::JsonParse {
            message: err.to_string(),
            src: NamedSource::new(name, contents),
            span: (offset, len).into(),
        }
    }
}

/// Translate serde_json's 1-based line and column into a byte offset.
fn byte_offset(contents: &str, line: usize, column: usize) -> usize {
    let line_start: usize = contents
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(contents.len())
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    use tasklens_core::Error;

    match err {
        CliError::ConfigRead { .. }
        | CliError::Core(Error::InvalidConfig { .. } | Error::ConfigParse { .. }) => EXIT_CLI,
        CliError::FileRead { .. }
        | CliError::JsonParse { .. }
        | CliError::Core(Error::Malformed { .. })
        | CliError::Output { .. } => EXIT_INPUT,
    }
}

/// Render an error with miette's report handler on stderr
#[allow(clippy::print_stderr)]
pub fn render_error(err: CliError) {
    let report = Report::new(err);
    eprintln!("{report:?}");
    let _ = io::stderr().flush();
}

/// Report output format
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Sectioned human-readable report
    #[default]
    Text,
    /// Pretty-printed JSON report
    Json,
}

/// Analyze a JSON task list: schema, complexity, dependencies and progress.
#[derive(Parser, Debug)]
#[command(name = "tasklens")]
#[command(about = "Analyze a JSON task list for structure, complexity, dependencies and progress")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Task file to analyze.
    #[arg(env = "TASKLENS_FILE", default_value = "task.json")]
    pub file: PathBuf,

    /// Analyzer configuration file (TOML).
    #[arg(long, env = "TASKLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Progress bar width; overrides the configuration file.
    #[arg(long)]
    pub bar_width: Option<usize>,

    /// Report format.
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Exit with a non-zero status when the report contains findings.
    #[arg(long)]
    pub deny_findings: bool,

    /// Logging verbosity level.
    #[arg(
        short = 'l',
        long,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    /// Log output format.
    #[arg(long, default_value = "compact", value_enum)]
    pub log_format: TracingFormat,
}

/// Parse the process arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
