//! Validation utilities for dependency graphs.
//!
//! This module summarises graph health: unresolved references and the
//! cycle witness, if any.

use crate::{CyclePath, DanglingReference, DependencyGraph, TaskNodeData};
use serde::Serialize;

/// Result of graph validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Dependencies that matched no known task, in declaration order.
    pub dangling: Vec<DanglingReference>,
    /// One cycle witness, when the graph is cyclic.
    pub cycle: Option<CyclePath>,
}

impl ValidationResult {
    /// Whether the graph has neither dangling references nor a cycle.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.dangling.is_empty() && self.cycle.is_none()
    }
}

impl<T: TaskNodeData> DependencyGraph<'_, T> {
    /// Validate the graph structure.
    ///
    /// Checks for:
    /// - References to unknown tasks
    /// - Cycles in the dependency graph
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        ValidationResult {
            dangling: self.dangling_references().to_vec(),
            cycle: self.find_cycle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::TestTask;

    #[test]
    fn test_validate_empty_graph() {
        let tasks: Vec<TestTask> = vec![];
        let result = DependencyGraph::build(&tasks).validate();
        assert!(result.is_valid());
        assert!(result.dangling.is_empty());
    }

    #[test]
    fn test_validate_valid_graph() {
        let tasks = vec![TestTask::new("a", &[]), TestTask::new("b", &["a"])];
        let result = DependencyGraph::build(&tasks).validate();
        assert!(result.is_valid());
    }

    #[test]
    fn test_validate_cyclic_graph() {
        let tasks = vec![TestTask::new("a", &["b"]), TestTask::new("b", &["a"])];
        let result = DependencyGraph::build(&tasks).validate();
        assert!(!result.is_valid());
        assert!(result.dangling.is_empty());
        assert_eq!(result.cycle.map(|c| c.to_string()).as_deref(), Some("a -> b -> a"));
    }

    #[test]
    fn test_validate_dangling_reference() {
        let tasks = vec![TestTask::new("a", &["ghost"])];
        let result = DependencyGraph::build(&tasks).validate();
        assert!(!result.is_valid());
        assert_eq!(result.dangling.len(), 1);
        assert_eq!(result.dangling[0].dependency, "ghost");
        assert!(result.cycle.is_none());
    }
}
