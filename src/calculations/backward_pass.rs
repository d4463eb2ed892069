use crate::graph::TaskGraph;
use petgraph::Direction;
use std::collections::HashMap;

pub struct BackwardPass<'a> {
    graph: &'a TaskGraph,
}

impl<'a> BackwardPass<'a> {
    pub fn new(graph: &'a TaskGraph) -> Self {
        Self { graph }
    }

    /// Late start/finish per normalized task id. Every task with no
    /// successors anchors at `project_finish`, however many disconnected
    /// sink clusters the graph has; every other task finishes no later than
    /// the minimum late start over its successors.
    ///
    /// Assumes the task set already passed validation.
    pub fn execute(&self, project_finish: i64) -> HashMap<String, (i64, i64)> {
        let mut results: HashMap<String, (i64, i64)> =
            HashMap::with_capacity(self.graph.graph.node_count());

        let mut order = self.graph.topological_order();
        order.reverse();

        for node_ix in order {
            let task_id = &self.graph.graph[node_ix];
            let late_finish = self
                .graph
                .graph
                .neighbors_directed(node_ix, Direction::Outgoing)
                .filter_map(|succ_ix| {
                    results
                        .get(&self.graph.graph[succ_ix])
                        .map(|&(late_start, _)| late_start)
                })
                .min()
                .unwrap_or(project_finish);
            let duration = self.graph.durations.get(task_id).copied().unwrap_or(0);
            results.insert(task_id.clone(), (late_finish - duration, late_finish));
        }

        results
    }
}
