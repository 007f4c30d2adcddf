//! Logical timing using forward and backward passes.
//!
//! Resources are unlimited here: tasks may overlap freely, so the result only
//! measures dependency-driven flexibility.

use crate::interner::TaskIdx;
use crate::log_trace;

use super::graph::TaskGraph;
use super::topo::TopoOrder;
use super::types::TaskTiming;

/// Result of the logical pass.
#[derive(Clone, Debug, Default)]
pub struct LogicalTimings {
    /// Indexed by task; `None` for tasks excluded by a cycle.
    pub timings: Vec<Option<TaskTiming>>,
    /// Max earliest finish over all ordered tasks (0 when there are none).
    /// Negative when every ordered task has a negative duration.
    pub logical_duration: f64,
}

impl LogicalTimings {
    #[inline]
    pub fn get(&self, idx: TaskIdx) -> Option<&TaskTiming> {
        self.timings[idx as usize].as_ref()
    }

    pub fn is_critical(&self, idx: TaskIdx, epsilon: f64) -> bool {
        self.get(idx).is_some_and(|t| t.is_critical(epsilon))
    }
}

/// Compute earliest/latest start and finish for every ordered task.
pub fn calculate_logical_timings(
    graph: &TaskGraph,
    topo: &TopoOrder,
    verbosity: u8,
) -> LogicalTimings {
    let mut timings: Vec<Option<TaskTiming>> = vec![None; graph.len()];

    // Forward pass: dependencies and the task's own constraint both bound the start
    for &idx in &topo.order {
        let i = idx as usize;
        let mut earliest_start = graph.releases[i];
        for &pred in &graph.predecessors[i] {
            if let Some(ref pred_timing) = timings[pred as usize] {
                if pred_timing.earliest_finish > earliest_start {
                    earliest_start = pred_timing.earliest_finish;
                }
            }
        }

        timings[i] = Some(TaskTiming {
            earliest_start,
            earliest_finish: earliest_start + graph.durations[i],
            latest_start: 0.0,  // Filled in by the backward pass
            latest_finish: 0.0, // Filled in by the backward pass
            slack: 0.0,
        });
    }

    let logical_duration = topo
        .order
        .iter()
        .filter_map(|&idx| timings[idx as usize].as_ref())
        .map(|t| t.earliest_finish)
        .reduce(f64::max)
        .unwrap_or(0.0);

    // Backward pass: successors excluded by a cycle do not constrain
    for &idx in topo.order.iter().rev() {
        let i = idx as usize;
        let mut latest_finish = f64::MAX;
        for &succ in &graph.successors[i] {
            if let Some(ref succ_timing) = timings[succ as usize] {
                if succ_timing.latest_start < latest_finish {
                    latest_finish = succ_timing.latest_start;
                }
            }
        }

        if latest_finish == f64::MAX {
            latest_finish = logical_duration;
        }

        if let Some(ref mut timing) = timings[i] {
            timing.latest_finish = latest_finish;
            timing.latest_start = latest_finish - graph.durations[i];
            timing.slack = timing.latest_start - timing.earliest_start;

            log_trace!(
                verbosity,
                "[cpm] {}: ES={:.3} EF={:.3} LS={:.3} LF={:.3} float={:.3}",
                graph.id(idx),
                timing.earliest_start,
                timing.earliest_finish,
                timing.latest_start,
                timing.latest_finish,
                timing.slack
            );
        }
    }

    LogicalTimings {
        timings,
        logical_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DurationPolicy;
    use crate::critical_path::topo::topological_sort;
    use crate::models::Task;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn make_task(id: &str, duration: f64, deps: Vec<&str>) -> Task {
        Task::new(id, duration, base()).depends_on_all(deps)
    }

    fn run(tasks: &[Task]) -> (TaskGraph, LogicalTimings) {
        let graph = TaskGraph::build(tasks, DurationPolicy::Preserve, &mut Vec::new()).unwrap();
        let topo = topological_sort(&graph);
        let timings = calculate_logical_timings(&graph, &topo, 0);
        (graph, timings)
    }

    fn timing<'a>(graph: &TaskGraph, result: &'a LogicalTimings, id: &str) -> &'a TaskTiming {
        result.get(graph.index.get(id).unwrap()).unwrap()
    }

    #[test]
    fn test_chain() {
        let tasks = vec![
            make_task("a", 2.0, vec![]),
            make_task("b", 3.0, vec!["a"]),
            make_task("c", 4.0, vec!["b"]),
        ];
        let (graph, result) = run(&tasks);

        assert_eq!(result.logical_duration, 9.0);
        let c = timing(&graph, &result, "c");
        assert_eq!(c.earliest_start, 5.0);
        assert_eq!(c.latest_finish, 9.0);
        for id in ["a", "b", "c"] {
            assert!(timing(&graph, &result, id).is_critical(1e-3));
        }
    }

    #[test]
    fn test_parallel_paths_with_slack() {
        // a (2h) -> target, b (5h) -> target
        let tasks = vec![
            make_task("a", 2.0, vec![]),
            make_task("b", 5.0, vec![]),
            make_task("target", 1.0, vec!["a", "b"]),
        ];
        let (graph, result) = run(&tasks);

        assert_eq!(result.logical_duration, 6.0);
        let a = timing(&graph, &result, "a");
        assert!((a.slack - 3.0).abs() < 1e-9);
        assert!((a.latest_finish - 5.0).abs() < 1e-9);
        assert!(timing(&graph, &result, "b").is_critical(1e-3));
        assert!(timing(&graph, &result, "target").is_critical(1e-3));
    }

    #[test]
    fn test_diamond() {
        let tasks = vec![
            make_task("a", 2.0, vec![]),
            make_task("b", 3.0, vec!["a"]),
            make_task("c", 5.0, vec!["a"]),
            make_task("d", 1.0, vec!["b", "c"]),
        ];
        let (graph, result) = run(&tasks);

        assert_eq!(result.logical_duration, 8.0);
        let b = timing(&graph, &result, "b");
        assert!((b.slack - 2.0).abs() < 1e-9);
        assert!(timing(&graph, &result, "c").is_critical(1e-3));
    }

    #[test]
    fn test_earliest_start_constraint_dominates() {
        // b depends on a (done at 2h) but may not begin before +10h
        let tasks = vec![
            make_task("a", 2.0, vec![]),
            Task::new("b", 1.0, base() + Duration::hours(10)).depends_on("a"),
        ];
        let (graph, result) = run(&tasks);

        let b = timing(&graph, &result, "b");
        assert_eq!(b.earliest_start, 10.0);
        assert_eq!(result.logical_duration, 11.0);

        // a only has to finish by b's late start
        let a = timing(&graph, &result, "a");
        assert!((a.latest_finish - 10.0).abs() < 1e-9);
        assert!((a.slack - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_durations_preserved_and_slack_non_negative() {
        let tasks = vec![
            make_task("a", 1.5, vec![]),
            make_task("b", 2.25, vec!["a"]),
            make_task("c", 0.75, vec!["a"]),
            make_task("d", 4.0, vec![]),
            make_task("e", 1.0, vec!["b", "c"]),
        ];
        let (_, result) = run(&tasks);

        for timing in result.timings.iter().flatten() {
            let d = timing.earliest_finish - timing.earliest_start;
            assert!((timing.latest_finish - timing.latest_start - d).abs() < 1e-9);
            assert!(timing.slack >= 0.0);
        }
    }

    #[test]
    fn test_cycle_members_have_no_timing() {
        let tasks = vec![
            make_task("a", 1.0, vec![]),
            make_task("x", 1.0, vec!["a", "y"]),
            make_task("y", 1.0, vec!["x"]),
        ];
        let (graph, result) = run(&tasks);

        assert!(result.get(graph.index.get("x").unwrap()).is_none());
        // a's only successor is excluded, so a falls back to the project end
        let a = timing(&graph, &result, "a");
        assert_eq!(a.latest_finish, 1.0);
        assert!(a.is_critical(1e-3));
    }
}
