//! One analysis run: configuration, task file, report.

use crate::cli::{Cli, CliError, EXIT_FINDINGS, EXIT_OK, OutputFormat};
use crate::render;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tasklens_core::{Analyzer, AnalyzerConfig};
use tracing::{debug, info, instrument};

/// Load the analyzer configuration, applying command-line overrides.
///
/// Without a file the defaults are used. The result is validated after the
/// overrides are applied.
///
/// # Errors
///
/// Fails when the file cannot be read, is not a valid configuration, or the
/// final values are inconsistent.
pub fn load_config(path: Option<&Path>, bar_width: Option<usize>) -> Result<AnalyzerConfig, CliError> {
    let mut config = match path {
        Some(path) => {
            let source = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), "Loaded analyzer configuration");
            AnalyzerConfig::from_toml_str(&source)?
        }
        None => AnalyzerConfig::default(),
    };
    if let Some(width) = bar_width {
        config.progress.bar_width = width;
    }
    config.validate()?;
    Ok(config)
}

/// Read and parse a task file.
///
/// # Errors
///
/// Fails when the file cannot be read or is not valid JSON.
pub fn load_document(path: &Path) -> Result<Value, CliError> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    match serde_json::from_str(&contents) {
        Ok(document) => {
            debug!(path = %path.display(), bytes = contents.len(), "Loaded task file");
            Ok(document)
        }
        Err(err) => Err(CliError::json_parse(path.display().to_string(), contents, &err)),
    }
}

/// Run one analysis as described by `cli`, writing the report to `out`.
///
/// Returns the process exit code: [`EXIT_FINDINGS`] when `--deny-findings`
/// is set and the report has findings, [`EXIT_OK`] otherwise.
///
/// # Errors
///
/// Returns a [`CliError`] for any fatal condition; findings inside the task
/// list are never errors.
#[instrument(name = "tasklens", skip_all, fields(file = %cli.file.display()))]
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<i32, CliError> {
    let config = load_config(cli.config.as_deref(), cli.bar_width)?;
    let document = load_document(&cli.file)?;
    let report = Analyzer::new(config).analyze(&document)?;

    match cli.format {
        OutputFormat::Text => render::text(&report, out),
        OutputFormat::Json => render::json(&report, out),
    }
    .and_then(|()| out.flush())
    .map_err(|source| CliError::Output { source })?;

    let findings = report.has_findings();
    info!(findings, deny = cli.deny_findings, "Report written");
    Ok(if cli.deny_findings && findings {
        EXIT_FINDINGS
    } else {
        EXIT_OK
    })
}
