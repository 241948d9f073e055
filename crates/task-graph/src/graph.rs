//! Dependency graph builder using petgraph.
//!
//! This module turns a slice of task definitions into a directed graph where
//! an edge `dep -> task` means `task` cannot start before `dep` is done.
//! References to unknown ids never become edges; they are collected as
//! [`DanglingReference`]s instead.

use crate::TaskNodeData;
use petgraph::Direction;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A node in the dependency graph.
#[derive(Debug)]
pub struct GraphNode<'a, T> {
    /// Stringified id of the task.
    pub id: String,
    /// The task this node was built from.
    pub task: &'a T,
}

/// A declared dependency that does not resolve to any known task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    /// Id of the task declaring the dependency.
    pub task: String,
    /// The unresolved dependency value.
    pub dependency: String,
}

/// Dependency graph for one analysis pass.
///
/// The graph borrows the tasks it was built from and is never mutated after
/// [`DependencyGraph::build`] returns. Duplicate entries in a task's
/// dependency list become parallel edges and count once each towards the
/// in-degree of the dependent task.
pub struct DependencyGraph<'a, T: TaskNodeData> {
    /// The directed graph of tasks.
    graph: DiGraph<GraphNode<'a, T>, ()>,
    /// Map from task ids to node indices, ordered by id.
    id_to_node: BTreeMap<String, NodeIndex>,
    /// Unresolved references in declaration order.
    dangling: Vec<DanglingReference>,
}

impl<'a, T: TaskNodeData> DependencyGraph<'a, T> {
    /// Build the graph for a task sequence.
    ///
    /// Tasks without an id get no node; their unresolved dependencies are
    /// still reported, under [`TaskNodeData::display_id`]. When an id occurs
    /// more than once the last task with that id backs the node, and the
    /// dependencies of every task sharing the id are attached to it.
    #[must_use]
    pub fn build(tasks: &'a [T]) -> Self {
        let mut graph = Self {
            graph: DiGraph::new(),
            id_to_node: BTreeMap::new(),
            dangling: Vec::new(),
        };

        for task in tasks {
            match task.node_id() {
                Some(id) => {
                    graph.add_task(id, task);
                }
                None => warn!("Task without an id gets no graph node"),
            }
        }

        graph.add_dependency_edges(tasks);
        debug!(
            nodes = graph.task_count(),
            edges = graph.edge_count(),
            dangling = graph.dangling.len(),
            "Built dependency graph"
        );
        graph
    }

    fn add_task(&mut self, id: &str, task: &'a T) -> NodeIndex {
        if let Some(&node) = self.id_to_node.get(id) {
            warn!("Duplicate task id '{}', the later definition wins", id);
            self.graph[node].task = task;
            return node;
        }

        let node_index = self.graph.add_node(GraphNode {
            id: id.to_string(),
            task,
        });
        self.id_to_node.insert(id.to_string(), node_index);
        debug!("Added task node '{}'", id);

        node_index
    }

    /// Add dependency edges once every node is known.
    fn add_dependency_edges(&mut self, tasks: &'a [T]) {
        let mut edges_to_add = Vec::new();

        for task in tasks {
            let node_index = task
                .node_id()
                .and_then(|id| self.id_to_node.get(id).copied());

            for dep in task.dependency_ids() {
                match (self.id_to_node.get(dep), node_index) {
                    (Some(&dep_index), Some(node_index)) => {
                        edges_to_add.push((dep_index, node_index));
                    }
                    // Resolved, but the declaring task has no node to hang the edge on.
                    (Some(_), None) => {}
                    (None, _) => {
                        let id = task.display_id();
                        debug!("Task '{}' depends on unknown task '{}'", id, dep);
                        self.dangling.push(DanglingReference {
                            task: id.to_string(),
                            dependency: dep.to_string(),
                        });
                    }
                }
            }
        }

        for (from, to) in edges_to_add {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Check if the graph has cycles.
    ///
    /// This is a yes/no answer; use [`DependencyGraph::find_cycle`] for a
    /// witness path.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Get the number of tasks in the graph.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of resolved dependency edges, parallel edges included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if a task id exists in the graph.
    #[must_use]
    pub fn contains_task(&self, id: &str) -> bool {
        self.id_to_node.contains_key(id)
    }

    /// Get a task node by id.
    #[must_use]
    pub fn get_node_by_id(&self, id: &str) -> Option<&GraphNode<'a, T>> {
        self.id_to_node
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Known task ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.id_to_node.keys().map(String::as_str)
    }

    /// Ids of the tasks that depend on `id`, in the order the edges were
    /// declared. Parallel edges appear once per declaration.
    #[must_use]
    pub fn dependents(&self, id: &str) -> Vec<&str> {
        self.id_to_node
            .get(id)
            .map(|&idx| {
                self.dependents_of(idx)
                    .into_iter()
                    .map(|dep| self.graph[dep].id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Adjacency mapping from every known id to its dependents.
    #[must_use]
    pub fn adjacency(&self) -> BTreeMap<&str, Vec<&str>> {
        self.ids().map(|id| (id, self.dependents(id))).collect()
    }

    /// Number of resolved incoming edges for `id`.
    #[must_use]
    pub fn in_degree(&self, id: &str) -> Option<usize> {
        self.id_to_node.get(id).map(|&idx| self.in_degree_of(idx))
    }

    /// In-degree mapping for every known id.
    #[must_use]
    pub fn in_degrees(&self) -> BTreeMap<&str, usize> {
        self.id_to_node
            .iter()
            .map(|(id, &idx)| (id.as_str(), self.in_degree_of(idx)))
            .collect()
    }

    /// Dependencies that did not resolve, in declaration order.
    #[must_use]
    pub fn dangling_references(&self) -> &[DanglingReference] {
        &self.dangling
    }

    pub(crate) fn node(&self, idx: NodeIndex) -> &GraphNode<'a, T> {
        &self.graph[idx]
    }

    pub(crate) fn node_bound(&self) -> usize {
        self.graph.node_count()
    }

    /// Node indices ordered by task id.
    pub(crate) fn sorted_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.id_to_node.values().copied()
    }

    /// Outgoing neighbours of `idx` in edge insertion order.
    ///
    /// petgraph walks adjacency lists newest-first, so edges are re-sorted by
    /// their index.
    pub(crate) fn dependents_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        edges.sort_by_key(|(edge_id, _)| *edge_id);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    pub(crate) fn in_degree_of(&self, idx: NodeIndex) -> usize {
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .count()
    }
}
