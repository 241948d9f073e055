//! Task list data model.
//!
//! Mirrors the JSON task file: `{"project", "description"?, "tasks": [...]}`.
//! Every task field except the ones the analysis cannot do without is
//! optional and falls back to a default.

use crate::Result;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;
use tasklens_task_graph::TaskNodeData;

/// Priority assumed for tasks that do not declare one.
pub const DEFAULT_PRIORITY: i64 = 3;

/// Title shown for tasks that do not declare one.
pub const UNTITLED: &str = "untitled";

/// Id shown for tasks that do not declare one.
pub const UNKNOWN_ID: &str = tasklens_task_graph::UNKNOWN_NODE_ID;

/// Task identifier.
///
/// Ids may be written as strings or numbers in the task file. Both are
/// stored stringified, so `3` and `"3"` name the same task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(String);

impl TaskId {
    /// Create an id from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The stringified id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct TaskIdVisitor;

impl Visitor<'_> for TaskIdVisitor {
    type Value = TaskId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or numeric task id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<TaskId, E> {
        Ok(TaskId::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<TaskId, E> {
        Ok(TaskId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<TaskId, E> {
        Ok(TaskId(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<TaskId, E> {
        Ok(TaskId(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<TaskId, E> {
        // serde_json's formatting keeps the fraction ("1.0"), matching how
        // the id was written
        serde_json::Number::from_f64(v)
            .map(|n| TaskId(n.to_string()))
            .ok_or_else(|| E::custom("task id must be a finite number"))
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(TaskIdVisitor)
    }
}

/// A single unit of work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier, unique within the task list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Ordered steps. Only their count is used, so any JSON value is accepted.
    #[serde(default)]
    pub steps: Vec<Value>,

    /// Acceptance criteria. Only their count is used.
    #[serde(default)]
    pub acceptance_criteria: Vec<Value>,

    /// Priority, [`DEFAULT_PRIORITY`] when absent. Any JSON number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Number>,

    /// Ids that must complete before this task.
    #[serde(default)]
    pub depends_on: Vec<TaskId>,

    /// Whether the task is complete.
    #[serde(default)]
    pub passes: bool,

    /// Whether the task is blocked.
    #[serde(default)]
    pub blocked: bool,

    /// Why the task is blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_reason: Option<String>,
}

impl Task {
    /// Create a task with an id and title and no other data.
    #[must_use]
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Id for display, [`UNKNOWN_ID`] when absent.
    #[must_use]
    pub fn display_id(&self) -> &str {
        self.id.as_ref().map_or(UNKNOWN_ID, TaskId::as_str)
    }

    /// Title for display, [`UNTITLED`] when absent.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    /// Declared priority or [`DEFAULT_PRIORITY`].
    #[must_use]
    pub fn effective_priority(&self) -> Number {
        self.priority
            .clone()
            .unwrap_or_else(|| Number::from(DEFAULT_PRIORITY))
    }
}

impl TaskNodeData for Task {
    fn node_id(&self) -> Option<&str> {
        self.id.as_ref().map(TaskId::as_str)
    }

    fn dependency_ids(&self) -> impl Iterator<Item = &str> {
        self.depends_on.iter().map(TaskId::as_str)
    }

    fn display_id(&self) -> &str {
        Task::display_id(self)
    }

    fn is_complete(&self) -> bool {
        self.passes
    }
}

/// Top-level task file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    /// Project name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Optional project description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The tasks, in file order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskList {
    /// Interpret an already-parsed JSON document as a task list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] with the JSON path of the first
    /// value that does not fit the model, for example a `tasks` field that
    /// is not an array.
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(serde_path_to_error::deserialize(value)?)
    }
}
