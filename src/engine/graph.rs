// ABOUTME: Task registration and dependency graph validation
// ABOUTME: Produces a deterministic topological execution order with registration-order tie-breaks

use indexmap::IndexMap;
use petgraph::algo::toposort;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::Direction;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::error::{ExecutionError, Result};
use super::task::Task;

/// Collects tasks and dependency edges, then validates into a [`TaskGraph`].
#[derive(Default)]
pub struct GraphBuilder {
    tasks: IndexMap<String, Task>,
}

/// A validated set of tasks with a fixed execution order. Immutable once
/// built; constructed fresh for each run definition.
pub struct TaskGraph {
    tasks: IndexMap<String, Task>,
    order: Vec<String>,
}

impl std::fmt::Debug for TaskGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskGraph")
            .field("tasks", &self.tasks.keys().collect::<Vec<_>>())
            .field("order", &self.order)
            .finish()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task. Ids must be unique within the graph.
    pub fn register(&mut self, task: Task) -> Result<()> {
        if self.tasks.contains_key(&task.id) {
            return Err(ExecutionError::DuplicateTask {
                task_id: task.id.clone(),
            });
        }
        self.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    /// Validate the edge set and compute the execution order. Every upstream
    /// reference must name a registered task and the edges must be acyclic.
    pub fn build(self) -> Result<TaskGraph> {
        let mut graph: Graph<String, ()> = Graph::new();
        let mut indices: IndexMap<String, NodeIndex> = IndexMap::new();

        // Nodes are added in registration order, so NodeIndex order is
        // registration order. The tie-break below relies on this.
        for task_id in self.tasks.keys() {
            let index = graph.add_node(task_id.clone());
            indices.insert(task_id.clone(), index);
        }

        for (task_id, task) in &self.tasks {
            let task_node = indices[task_id];
            for dependency in &task.upstream {
                match indices.get(dependency) {
                    Some(&dep_node) => {
                        graph.add_edge(dep_node, task_node, ());
                    }
                    None => {
                        return Err(ExecutionError::UnknownDependency {
                            task_id: task_id.clone(),
                            dependency: dependency.clone(),
                        });
                    }
                }
            }
        }

        // toposort detects cycles and names a task on one
        toposort(&graph, None).map_err(|cycle| ExecutionError::Cycle {
            task_id: graph[cycle.node_id()].clone(),
        })?;

        let order = Self::stable_order(&graph);

        Ok(TaskGraph {
            tasks: self.tasks,
            order,
        })
    }

    /// Kahn's algorithm with a min-heap over node indices: among tasks whose
    /// dependencies are all satisfied, the earliest-registered runs first.
    /// Reproducible across runs regardless of hash ordering.
    fn stable_order(graph: &Graph<String, ()>) -> Vec<String> {
        let mut indegree: Vec<usize> = graph
            .node_indices()
            .map(|node| graph.neighbors_directed(node, Direction::Incoming).count())
            .collect();

        let mut ready: BinaryHeap<Reverse<NodeIndex>> = graph
            .node_indices()
            .filter(|node| indegree[node.index()] == 0)
            .map(Reverse)
            .collect();

        let mut order = Vec::with_capacity(graph.node_count());
        while let Some(Reverse(node)) = ready.pop() {
            order.push(graph[node].clone());
            for successor in graph.neighbors_directed(node, Direction::Outgoing) {
                indegree[successor.index()] -= 1;
                if indegree[successor.index()] == 0 {
                    ready.push(Reverse(successor));
                }
            }
        }
        order
    }
}

impl TaskGraph {
    /// Execution order: topological, upstream-before-downstream.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    /// Tasks in execution order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|task_id| self.tasks.get(task_id))
    }

    /// Tasks with no upstream dependencies.
    pub fn roots(&self) -> Vec<&str> {
        self.tasks()
            .filter(|task| task.is_root())
            .map(|task| task.id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
