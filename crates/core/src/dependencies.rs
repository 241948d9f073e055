//! Dependency graph findings for a task list.

use crate::model::Task;
use serde::Serialize;
use tasklens_task_graph::{CyclePath, DanglingReference, DependencyGraph, TaskStatus};

/// A task placed in an execution level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeveledTask {
    /// Task id.
    pub id: String,
    /// Task title, `untitled` when absent.
    pub title: String,
    /// Done when the task passes, pending otherwise.
    pub status: TaskStatus,
}

/// Dependency graph health and execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    /// References to unknown tasks, in declaration order.
    pub dangling: Vec<DanglingReference>,
    /// One cycle witness, when the graph is cyclic.
    pub cycle: Option<CyclePath>,
    /// Execution levels. Tasks on or behind a cycle are absent.
    pub levels: Vec<Vec<LeveledTask>>,
}

/// Build the dependency graph and collect its findings.
#[must_use]
pub fn analyze_dependencies(tasks: &[Task]) -> DependencyReport {
    let graph = DependencyGraph::build(tasks);
    let validation = graph.validate();

    let levels = graph
        .execution_levels()
        .into_iter()
        .map(|level| {
            level
                .into_iter()
                .map(|entry| LeveledTask {
                    title: graph
                        .get_node_by_id(&entry.id)
                        .map_or(crate::model::UNTITLED, |node| node.task.display_title())
                        .to_string(),
                    id: entry.id,
                    status: entry.status,
                })
                .collect()
        })
        .collect();

    DependencyReport {
        dangling: validation.dangling,
        cycle: validation.cycle,
        levels,
    }
}
