//! Structural checks on the raw task document.
//!
//! Runs on the parsed JSON before it is interpreted as a [`crate::TaskList`],
//! so it can report missing fields that the typed model would quietly
//! default.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Fields every task object must carry.
pub const REQUIRED_TASK_FIELDS: [&str; 4] = ["id", "title", "steps", "passes"];

/// One structural problem in a task document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    /// The document is not a JSON object.
    RootNotObject,
    /// No `project` field.
    MissingProject,
    /// No `tasks` field.
    MissingTasks,
    /// `tasks` is present but not an array.
    TasksNotArray,
    /// An entry of `tasks` is not an object.
    TaskNotObject {
        /// Position in `tasks`.
        index: usize,
    },
    /// A task lacks one of [`REQUIRED_TASK_FIELDS`].
    MissingTaskField {
        /// Position in `tasks`.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotObject => write!(f, "document root should be an object"),
            Self::MissingProject => write!(f, "missing 'project' field"),
            Self::MissingTasks => write!(f, "missing 'tasks' field"),
            Self::TasksNotArray => write!(f, "'tasks' should be an array"),
            Self::TaskNotObject { index } => write!(f, "tasks[{index}]: should be an object"),
            Self::MissingTaskField { index, field } => {
                write!(f, "tasks[{index}]: missing '{field}'")
            }
        }
    }
}

impl Serialize for SchemaViolation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Check the document shape and collect every problem found.
///
/// Checks run in a fixed order: `project`, `tasks`, the type of `tasks`,
/// then each task's required fields by index. Per-task checks only run when
/// `tasks` is an array. An empty result means the document is valid.
#[must_use]
pub fn validate_schema(document: &Value) -> Vec<SchemaViolation> {
    let Some(root) = document.as_object() else {
        return vec![SchemaViolation::RootNotObject];
    };

    let mut findings = Vec::new();

    if !root.contains_key("project") {
        findings.push(SchemaViolation::MissingProject);
    }

    match root.get("tasks") {
        None => findings.push(SchemaViolation::MissingTasks),
        Some(Value::Array(tasks)) => {
            for (index, task) in tasks.iter().enumerate() {
                let Some(task) = task.as_object() else {
                    findings.push(SchemaViolation::TaskNotObject { index });
                    continue;
                };
                for field in REQUIRED_TASK_FIELDS {
                    if !task.contains_key(field) {
                        findings.push(SchemaViolation::MissingTaskField { index, field });
                    }
                }
            }
        }
        Some(_) => findings.push(SchemaViolation::TasksNotArray),
    }

    debug!(findings = findings.len(), "Schema validation finished");
    findings
}
