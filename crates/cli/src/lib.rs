//! tasklens command-line front end
//!
//! Loads a JSON task list, runs [`tasklens_core::Analyzer`] over it and
//! renders the report as text or JSON on stdout.

/// Loading, analysis and output for one invocation.
pub mod analyze;
/// CLI argument parsing, errors and exit codes.
pub mod cli;
/// Text and JSON report rendering.
pub mod render;
/// Tracing and logging configuration.
pub mod tracing;

pub use analyze::{load_config, load_document, run};
