//! Traversal algorithms for dependency graphs.
//!
//! Cycle detection walks the graph depth-first with an explicit stack, and
//! the level scheduler peels off zero in-degree nodes one round at a time.
//! Both iterate in sorted id order so their output is reproducible.

use crate::{DependencyGraph, TaskNodeData};
use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// A cycle witness: ids starting and ending at the repeated node.
///
/// A self-loop on `a` is reported as `[a, a]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CyclePath(Vec<String>);

impl CyclePath {
    /// The ids along the cycle.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.0
    }

    /// Number of ids in the witness, the repeated node counted twice.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the witness is empty. A returned witness never is.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CyclePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" -> "))
    }
}

/// Completion status attached to a leveled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// The task passes.
    Done,
    /// The task is not complete yet.
    Pending,
}

impl From<bool> for TaskStatus {
    fn from(complete: bool) -> Self {
        if complete { Self::Done } else { Self::Pending }
    }
}

/// One task inside an execution level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelEntry {
    /// Task id.
    pub id: String,
    /// Completion status of the task.
    pub status: TaskStatus,
}

/// Layered topological order.
///
/// Level `k` holds every task whose prerequisites are all in levels before
/// `k`. Ids inside a level are sorted. Tasks on or behind a cycle appear in
/// no level.
pub type ExecutionLevels = Vec<Vec<LevelEntry>>;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

impl<T: TaskNodeData> DependencyGraph<'_, T> {
    /// Find one dependency cycle, if any exists.
    ///
    /// Roots are tried in sorted id order and neighbours in declaration
    /// order. The first back edge found closes the witness; the search does
    /// not enumerate further cycles. Parallel edges are harmless: the second
    /// visit of a finished node is a no-op.
    #[must_use]
    pub fn find_cycle(&self) -> Option<CyclePath> {
        let adjacency: Vec<Vec<NodeIndex>> = (0..self.node_bound())
            .map(|i| self.dependents_of(NodeIndex::new(i)))
            .collect();
        let mut color = vec![Color::White; self.node_bound()];
        let mut path: Vec<NodeIndex> = Vec::new();

        for root in self.sorted_indices() {
            if color[root.index()] != Color::White {
                continue;
            }

            // (node, index of the next neighbour to look at)
            let mut stack: Vec<(NodeIndex, usize)> = vec![(root, 0)];
            color[root.index()] = Color::Gray;
            path.push(root);

            while let Some(&(node, cursor)) = stack.last() {
                let Some(&next) = adjacency[node.index()].get(cursor) else {
                    color[node.index()] = Color::Black;
                    path.pop();
                    stack.pop();
                    continue;
                };

                if let Some(top) = stack.last_mut() {
                    top.1 += 1;
                }

                match color[next.index()] {
                    Color::White => {
                        color[next.index()] = Color::Gray;
                        path.push(next);
                        stack.push((next, 0));
                    }
                    Color::Gray => {
                        let start = path.iter().position(|&n| n == next).unwrap_or(0);
                        let mut ids: Vec<String> = path[start..]
                            .iter()
                            .map(|&n| self.node(n).id.clone())
                            .collect();
                        ids.push(self.node(next).id.clone());
                        debug!("Found dependency cycle: {}", ids.join(" -> "));
                        return Some(CyclePath(ids));
                    }
                    Color::Black => {}
                }
            }
        }

        None
    }

    /// Compute execution levels with a layered Kahn sort.
    ///
    /// Works on a private copy of the in-degrees; the graph itself is never
    /// touched. Cycles do not cause an error, the affected tasks are simply
    /// left out.
    #[must_use]
    pub fn execution_levels(&self) -> ExecutionLevels {
        let mut remaining: Vec<usize> = (0..self.node_bound())
            .map(|i| self.in_degree_of(NodeIndex::new(i)))
            .collect();

        // sorted_indices yields id order, so the first frontier is sorted
        let mut frontier: Vec<NodeIndex> = self
            .sorted_indices()
            .filter(|idx| remaining[idx.index()] == 0)
            .collect();
        let mut levels = ExecutionLevels::new();

        while !frontier.is_empty() {
            frontier.sort_by(|a, b| self.node(*a).id.cmp(&self.node(*b).id));
            let mut next = Vec::new();

            for &idx in &frontier {
                for dependent in self.dependents_of(idx) {
                    let degree = &mut remaining[dependent.index()];
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        next.push(dependent);
                    }
                }
            }

            levels.push(
                frontier
                    .iter()
                    .map(|&idx| {
                        let node = self.node(idx);
                        LevelEntry {
                            id: node.id.clone(),
                            status: TaskStatus::from(node.task.is_complete()),
                        }
                    })
                    .collect(),
            );
            frontier = next;
        }

        debug!(levels = levels.len(), "Computed execution levels");
        levels
    }
}
