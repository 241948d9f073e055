//! Step-count complexity classification.

use crate::config::ComplexityThresholds;
use crate::model::Task;
use serde::Serialize;
use serde_json::Number;
use tracing::debug;

/// Complexity bucket of a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// No steps at all. Reported as a warning.
    MissingSteps,
    /// Within the normal range.
    Normal,
    /// Larger than normal; informational only.
    Elevated,
    /// Too many steps; the task should be split. Reported as high severity.
    OverComplex,
}

impl Severity {
    /// Bucket a step count.
    #[must_use]
    pub fn classify(steps: usize, thresholds: &ComplexityThresholds) -> Self {
        if steps == 0 {
            Self::MissingSteps
        } else if steps > thresholds.split_above {
            Self::OverComplex
        } else if steps > thresholds.elevated_above {
            Self::Elevated
        } else {
            Self::Normal
        }
    }

    /// Whether this bucket produces an issue.
    #[must_use]
    pub fn is_issue(self) -> bool {
        matches!(self, Self::MissingSteps | Self::OverComplex)
    }
}

/// Complexity figures for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexityEntry {
    /// Task id, `?` when absent.
    pub id: String,
    /// Task title, `untitled` when absent.
    pub title: String,
    /// Number of steps.
    pub steps: usize,
    /// Number of acceptance criteria.
    pub criteria: usize,
    /// Priority as written in the task file, defaulted.
    pub priority: Number,
    /// Complexity bucket.
    pub severity: Severity,
}

/// Outcome of the complexity pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComplexityReport {
    /// The task list defines no tasks.
    NoTasks,
    /// Per-task entries and the issues found among them.
    Analyzed {
        /// One entry per task, in file order.
        entries: Vec<ComplexityEntry>,
        /// Human-readable issues for tasks with no or too many steps.
        issues: Vec<String>,
    },
}

impl ComplexityReport {
    /// Per-task entries; empty for [`ComplexityReport::NoTasks`].
    #[must_use]
    pub fn entries(&self) -> &[ComplexityEntry] {
        match self {
            Self::NoTasks => &[],
            Self::Analyzed { entries, .. } => entries,
        }
    }

    /// Issues found; empty for [`ComplexityReport::NoTasks`].
    #[must_use]
    pub fn issues(&self) -> &[String] {
        match self {
            Self::NoTasks => &[],
            Self::Analyzed { issues, .. } => issues,
        }
    }
}

/// Classify every task by step count.
#[must_use]
pub fn analyze_complexity(tasks: &[Task], thresholds: &ComplexityThresholds) -> ComplexityReport {
    if tasks.is_empty() {
        return ComplexityReport::NoTasks;
    }

    let mut entries = Vec::with_capacity(tasks.len());
    let mut issues = Vec::new();

    for task in tasks {
        let steps = task.steps.len();
        let severity = Severity::classify(steps, thresholds);
        let id = task.display_id();

        match severity {
            Severity::MissingSteps => issues.push(format!("Task {id}: no steps defined")),
            Severity::OverComplex => issues.push(format!(
                "Task {id}: too many steps ({steps}), consider splitting it"
            )),
            Severity::Normal | Severity::Elevated => {}
        }

        entries.push(ComplexityEntry {
            id: id.to_string(),
            title: task.display_title().to_string(),
            steps,
            criteria: task.acceptance_criteria.len(),
            priority: task.effective_priority(),
            severity,
        });
    }

    debug!(tasks = entries.len(), issues = issues.len(), "Complexity analysis finished");
    ComplexityReport::Analyzed { entries, issues }
}
