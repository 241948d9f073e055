//! Task list analysis for tasklens.
//!
//! Given a parsed task document, this crate reports structural problems,
//! per-task complexity, dependency graph health (dangling references, a
//! cycle witness, execution levels) and completion progress. It performs no
//! I/O; loading the file and rendering the report belong to the caller.
//!
//! # Example
//!
//! ```ignore
//! use tasklens_core::{Analyzer, AnalyzerConfig};
//!
//! let document: serde_json::Value = serde_json::from_str(&contents)?;
//! let report = Analyzer::new(AnalyzerConfig::default()).analyze(&document)?;
//! if let Some(cycle) = &report.dependencies.cycle {
//!     eprintln!("cycle: {cycle}");
//! }
//! ```

pub mod complexity;
pub mod config;
pub mod dependencies;
mod error;
pub mod model;
pub mod progress;
pub mod report;
pub mod schema;

pub use complexity::{ComplexityEntry, ComplexityReport, Severity};
pub use config::{AnalyzerConfig, ComplexityThresholds, MAX_BAR_WIDTH, ProgressConfig};
pub use dependencies::{DependencyReport, LeveledTask};
pub use error::{Error, Result};
pub use model::{Task, TaskId, TaskList};
pub use progress::{BlockedTask, ProgressBar, ProgressSummary};
pub use report::{AnalysisReport, Analyzer};
pub use schema::SchemaViolation;
pub use tasklens_task_graph::{CyclePath, DanglingReference, TaskStatus};
