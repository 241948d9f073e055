//! Dependency graph algorithms for tasklens.
//!
//! This crate builds a directed dependency graph from any task type that
//! implements [`TaskNodeData`] and answers the questions a task-list analysis
//! needs: which references dangle, whether a cycle exists, and in which
//! layered order the tasks become ready.
//!
//! # Key Types
//!
//! - [`DependencyGraph`]: Built fresh from a slice of tasks; read-only afterwards
//! - [`TaskNodeData`]: Trait that task types implement to be placed in the graph
//! - [`CyclePath`]: Witness path returned by the cycle detector
//! - [`ExecutionLevels`]: Layered topological ordering
//!
//! # Example
//!
//! ```ignore
//! use tasklens_task_graph::{DependencyGraph, TaskNodeData};
//!
//! struct MyTask {
//!     id: String,
//!     depends_on: Vec<String>,
//! }
//!
//! impl TaskNodeData for MyTask {
//!     fn node_id(&self) -> Option<&str> {
//!         Some(&self.id)
//!     }
//!
//!     fn dependency_ids(&self) -> impl Iterator<Item = &str> {
//!         self.depends_on.iter().map(String::as_str)
//!     }
//! }
//!
//! let graph = DependencyGraph::build(&tasks);
//! assert!(graph.find_cycle().is_none());
//! let levels = graph.execution_levels();
//! ```

mod graph;
mod traversal;
mod validation;

pub use graph::{DanglingReference, DependencyGraph, GraphNode};
pub use traversal::{CyclePath, ExecutionLevels, LevelEntry, TaskStatus};
pub use validation::ValidationResult;

/// Placeholder shown for a task that has no identifier.
pub const UNKNOWN_NODE_ID: &str = "?";

/// Trait for task data that can be stored in the dependency graph.
///
/// Implement this trait for your task type to let [`DependencyGraph::build`]
/// place it in the graph.
pub trait TaskNodeData {
    /// Returns the identifier of this task, stringified.
    ///
    /// Tasks without an identifier get no node, but their dependencies are
    /// still checked.
    fn node_id(&self) -> Option<&str>;

    /// Identifier used when reporting on this task.
    fn display_id(&self) -> &str {
        self.node_id().unwrap_or(UNKNOWN_NODE_ID)
    }

    /// Returns the identifiers of the tasks this task depends on, in
    /// declaration order. Duplicates and self-references are allowed.
    fn dependency_ids(&self) -> impl Iterator<Item = &str>;

    /// Whether the task is already complete.
    ///
    /// Drives the [`TaskStatus`] attached to each [`LevelEntry`].
    fn is_complete(&self) -> bool {
        false
    }
}
