use crate::graph::TaskGraph;
use petgraph::Direction;
use std::collections::HashMap;

pub struct ForwardPass<'a> {
    graph: &'a TaskGraph,
}

impl<'a> ForwardPass<'a> {
    pub fn new(graph: &'a TaskGraph) -> Self {
        Self { graph }
    }

    /// Early start/finish per normalized task id, in whole days from project
    /// day 0. A task with no predecessors starts at 0; otherwise it starts
    /// at the maximum early finish over its predecessors. Any topological
    /// order gives the same result since the max rule is commutative.
    ///
    /// Assumes the task set already passed validation.
    pub fn execute(&self) -> HashMap<String, (i64, i64)> {
        let mut results: HashMap<String, (i64, i64)> =
            HashMap::with_capacity(self.graph.graph.node_count());

        for node_ix in self.graph.topological_order() {
            let task_id = &self.graph.graph[node_ix];
            let early_start = self
                .graph
                .graph
                .neighbors_directed(node_ix, Direction::Incoming)
                .filter_map(|pred_ix| {
                    results
                        .get(&self.graph.graph[pred_ix])
                        .map(|&(_, early_finish)| early_finish)
                })
                .max()
                .unwrap_or(0);
            let duration = self.graph.durations.get(task_id).copied().unwrap_or(0);
            results.insert(task_id.clone(), (early_start, early_start + duration));
        }

        results
    }
}
