use crate::task::Task;
use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, VecDeque};

/// Dependency graph over normalized task ids. Edges run predecessor ->
/// successor, so forward traversal follows `Direction::Outgoing` and the
/// backward pass walks `Direction::Incoming`.
pub struct TaskGraph {
    pub graph: DiGraph<String, ()>,
    pub id_to_index: HashMap<String, NodeIndex>,
    pub durations: HashMap<String, i64>,
}

impl TaskGraph {
    /// Predecessor references that do not resolve to a known task are
    /// skipped here; the validator reports them before any scheduling runs.
    pub fn build(tasks: &[Task]) -> Self {
        let mut graph: DiGraph<String, ()> = DiGraph::new();
        let mut id_to_index: HashMap<String, NodeIndex> = HashMap::new();
        let mut durations: HashMap<String, i64> = HashMap::new();

        for task in tasks {
            let id = task.normalized_id();
            if id.is_empty() || id_to_index.contains_key(&id) {
                continue;
            }
            let node_ix = graph.add_node(id.clone());
            durations.insert(id.clone(), task.duration_days);
            id_to_index.insert(id, node_ix);
        }

        for task in tasks {
            let Some(&task_ix) = id_to_index.get(&task.normalized_id()) else {
                continue;
            };
            for pred in task.normalized_predecessors() {
                if let Some(&pred_ix) = id_to_index.get(&pred) {
                    if graph.find_edge(pred_ix, task_ix).is_none() {
                        graph.add_edge(pred_ix, task_ix, ());
                    }
                }
            }
        }

        Self {
            graph,
            id_to_index,
            durations,
        }
    }

    /// Kahn's algorithm. On a validated acyclic graph this orders every
    /// node; nodes on a cycle would simply never become ready and are left
    /// out, so callers must run cycle validation first.
    pub fn topological_order(&self) -> Vec<NodeIndex> {
        let mut in_degree: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|ix| {
                (
                    ix,
                    self.graph.neighbors_directed(ix, Direction::Incoming).count(),
                )
            })
            .collect();

        let mut ready: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|ix| in_degree[ix] == 0)
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some(node_ix) = ready.pop_front() {
            order.push(node_ix);
            for succ_ix in self.graph.neighbors_directed(node_ix, Direction::Outgoing) {
                if let Some(deg) = in_degree.get_mut(&succ_ix) {
                    *deg -= 1;
                    if *deg == 0 {
                        ready.push_back(succ_ix);
                    }
                }
            }
        }
        order
    }

    /// Ids of one dependency cycle, if any. A strongly connected component
    /// with more than one node is a cycle; so is a task listing itself as
    /// its own predecessor.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        for scc in tarjan_scc(&self.graph) {
            if scc.len() > 1 {
                let mut ids: Vec<String> =
                    scc.iter().map(|&ix| self.graph[ix].clone()).collect();
                ids.sort();
                return Some(ids);
            }
            if let [only] = scc[..] {
                if self.graph.find_edge(only, only).is_some() {
                    return Some(vec![self.graph[only].clone()]);
                }
            }
        }
        None
    }

    pub fn is_sink(&self, node_ix: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(node_ix, Direction::Outgoing)
            .next()
            .is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, duration: i64, preds: &[&str]) -> Task {
        let mut t = Task::new(id, id, duration);
        t.predecessors = preds.iter().map(|p| p.to_string()).collect();
        t
    }

    #[test]
    fn build_links_predecessor_to_successor() {
        let tasks = vec![task("A", 2, &[]), task("B", 3, &["A"])];
        let graph = TaskGraph::build(&tasks);
        let a = graph.id_to_index["a"];
        let b = graph.id_to_index["b"];
        assert!(graph.graph.find_edge(a, b).is_some());
        assert!(graph.is_sink(b));
        assert!(!graph.is_sink(a));
    }

    #[test]
    fn topological_order_covers_all_nodes_of_acyclic_graph() {
        let tasks = vec![
            task("A", 2, &[]),
            task("B", 3, &["A"]),
            task("C", 1, &["A"]),
            task("D", 2, &["B", "C"]),
        ];
        let graph = TaskGraph::build(&tasks);
        let order = graph.topological_order();
        assert_eq!(order.len(), 4);
        assert_eq!(graph.graph[order[0]], "a");
        assert_eq!(graph.graph[order[3]], "d");
    }

    #[test]
    fn find_cycle_reports_self_dependency() {
        let tasks = vec![task("A", 1, &["A"])];
        let graph = TaskGraph::build(&tasks);
        assert_eq!(graph.find_cycle(), Some(vec!["a".to_string()]));
    }
}
