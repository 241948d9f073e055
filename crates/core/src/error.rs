//! Error types for tasklens analysis.

use crate::schema::SchemaViolation;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for tasklens operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop an analysis before it produces a report.
///
/// Findings inside a well-formed task list (missing fields, dangling
/// references, cycles) are never errors; they are part of the report.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The document could not be interpreted as a task list.
    #[error("task list does not have the expected shape at `{path}`: {message}")]
    #[diagnostic(
        code(tasklens::core::malformed),
        help("expected an object with `project` and a `tasks` array of task objects")
    )]
    Malformed {
        /// JSON path of the offending value.
        path: String,
        /// Deserializer message.
        message: String,
        /// Schema findings gathered before interpretation failed.
        findings: Vec<SchemaViolation>,
    },

    /// Configuration values are inconsistent.
    #[error("invalid analyzer configuration: {message}")]
    #[diagnostic(code(tasklens::core::invalid_config))]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// Configuration file is not valid TOML for [`crate::AnalyzerConfig`].
    #[error("failed to parse analyzer configuration")]
    #[diagnostic(
        code(tasklens::core::config_parse),
        help("see the [complexity] and [progress] tables in the documentation")
    )]
    ConfigParse {
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Attach schema findings to a [`Error::Malformed`]; other variants pass
    /// through unchanged.
    #[must_use]
    pub fn with_findings(self, findings: Vec<SchemaViolation>) -> Self {
        match self {
            Self::Malformed { path, message, .. } => Self::Malformed {
                path,
                message,
                findings,
            },
            other => other,
        }
    }

    /// Schema findings carried by the error, if any.
    #[must_use]
    pub fn findings(&self) -> &[SchemaViolation] {
        match self {
            Self::Malformed { findings, .. } => findings,
            _ => &[],
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for Error {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        Self::Malformed {
            path: err.path().to_string(),
            message: err.inner().to_string(),
            findings: Vec::new(),
        }
    }
}
