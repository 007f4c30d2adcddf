//! Critical path reconstruction.

use crate::interner::TaskIdx;

use super::calculation::LogicalTimings;
use super::graph::TaskGraph;

/// Linearize the zero-float subgraph.
///
/// Roots (critical tasks without a critical predecessor) are visited in order of
/// earliest start, and each root is walked depth-first through critical
/// successors, siblings again by earliest start. A task reachable from several
/// roots is emitted once, at its first visit.
pub fn reconstruct_critical_path(
    graph: &TaskGraph,
    logical: &LogicalTimings,
    epsilon: f64,
) -> Vec<TaskIdx> {
    let n = graph.len();
    let critical: Vec<bool> = (0..n as TaskIdx)
        .map(|idx| logical.is_critical(idx, epsilon))
        .collect();

    let earliest_start = |idx: TaskIdx| {
        logical
            .get(idx)
            .map(|t| t.earliest_start)
            .unwrap_or(f64::MAX)
    };
    let by_start = |a: &TaskIdx, b: &TaskIdx| {
        earliest_start(*a)
            .total_cmp(&earliest_start(*b))
            .then(a.cmp(b))
    };

    let mut roots: Vec<TaskIdx> = (0..n as TaskIdx)
        .filter(|&idx| {
            critical[idx as usize]
                && !graph.predecessors[idx as usize]
                    .iter()
                    .any(|&p| critical[p as usize])
        })
        .collect();
    roots.sort_by(by_start);

    let mut visited = vec![false; n];
    let mut path: Vec<TaskIdx> = Vec::new();
    let mut stack: Vec<TaskIdx> = Vec::new();

    for root in roots {
        stack.push(root);
        while let Some(idx) = stack.pop() {
            if visited[idx as usize] {
                continue;
            }
            visited[idx as usize] = true;
            path.push(idx);

            let mut next: Vec<TaskIdx> = graph.successors[idx as usize]
                .iter()
                .copied()
                .filter(|&s| critical[s as usize] && !visited[s as usize])
                .collect();
            next.sort_by(by_start);
            // Reversed so the earliest sibling is popped first
            stack.extend(next.into_iter().rev());
        }
    }

    path
}
