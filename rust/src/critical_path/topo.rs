//! Topological ordering with Kahn's algorithm.

use std::collections::VecDeque;

use crate::interner::TaskIdx;

use super::graph::TaskGraph;

/// Result of ordering a task graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopoOrder {
    /// Tasks in dependency order (predecessors before successors).
    pub order: Vec<TaskIdx>,
    /// Tasks that never reached in-degree zero, in index order.
    /// Non-empty exactly when the graph contains a cycle.
    pub excluded: Vec<TaskIdx>,
}

impl TopoOrder {
    pub fn has_cycle(&self) -> bool {
        !self.excluded.is_empty()
    }
}

/// Order tasks so that every task follows all of its predecessors.
///
/// Ready tasks are dequeued FIFO, seeded in index order, so the result is
/// deterministic. A cycle never fails the sort: its members and everything
/// downstream of them end up in `excluded`.
pub fn topological_sort(graph: &TaskGraph) -> TopoOrder {
    let n = graph.len();
    let mut in_degree: Vec<usize> = graph.predecessors.iter().map(Vec::len).collect();

    let mut queue: VecDeque<TaskIdx> = (0..n as TaskIdx)
        .filter(|&idx| in_degree[idx as usize] == 0)
        .collect();

    let mut order: Vec<TaskIdx> = Vec::with_capacity(n);

    while let Some(idx) = queue.pop_front() {
        order.push(idx);

        for &succ in &graph.successors[idx as usize] {
            let degree = &mut in_degree[succ as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(succ);
            }
        }
    }

    let excluded = if order.len() == n {
        Vec::new()
    } else {
        (0..n as TaskIdx)
            .filter(|&idx| in_degree[idx as usize] > 0)
            .collect()
    };

    TopoOrder { order, excluded }
}
