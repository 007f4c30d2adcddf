//! Dependency graph construction.
//!
//! Tasks live in flat arrays addressed by [`TaskIdx`]; adjacency is stored as
//! index lists in both directions.

use chrono::NaiveDateTime;

use crate::config::DurationPolicy;
use crate::diagnostics::Diagnostic;
use crate::interner::{TaskIdInterner, TaskIdx};
use crate::models::{hours_between, Task};

use super::engine::CpmError;

/// Arena-backed task graph for one engine run.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    /// Task id <-> index mapping, in input order.
    pub index: TaskIdInterner,
    /// Effective durations (hours), indexed by task.
    pub durations: Vec<f64>,
    /// Offset of each task's earliest-start constraint from the anchor (hours, >= 0).
    pub releases: Vec<f64>,
    /// Tasks that must finish before each task may start.
    pub predecessors: Vec<Vec<TaskIdx>>,
    /// Tasks waiting on each task.
    pub successors: Vec<Vec<TaskIdx>>,
    /// Earliest constraint of all tasks; the zero point for offsets.
    pub anchor: Option<NaiveDateTime>,
}

impl TaskGraph {
    /// Build the graph from a task set.
    ///
    /// Duplicate ids, dangling dependencies and non-positive durations are
    /// pushed to `diagnostics`. Only [`DurationPolicy::Reject`] can fail.
    pub fn build(
        tasks: &[Task],
        policy: DurationPolicy,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Self, CpmError> {
        let mut index = TaskIdInterner::with_capacity(tasks.len());
        let mut accepted: Vec<&Task> = Vec::with_capacity(tasks.len());

        for task in tasks {
            if index.insert_unique(&task.id).is_some() {
                accepted.push(task);
            } else {
                diagnostics.push(Diagnostic::DuplicateTask {
                    task_id: task.id.clone(),
                });
            }
        }

        let n = accepted.len();
        let mut durations = Vec::with_capacity(n);
        for task in &accepted {
            durations.push(effective_duration(task, policy, diagnostics)?);
        }

        let anchor = accepted.iter().map(|t| t.earliest_start).min();
        let releases = match anchor {
            Some(anchor) => accepted
                .iter()
                .map(|t| hours_between(anchor, t.earliest_start))
                .collect(),
            None => Vec::new(),
        };

        let mut predecessors: Vec<Vec<TaskIdx>> = vec![Vec::new(); n];
        let mut successors: Vec<Vec<TaskIdx>> = vec![Vec::new(); n];

        for (idx, task) in accepted.iter().enumerate() {
            for dep_id in &task.dependencies {
                let Some(dep_idx) = index.get(dep_id) else {
                    diagnostics.push(Diagnostic::DanglingDependency {
                        task_id: task.id.clone(),
                        dependency_id: dep_id.clone(),
                    });
                    continue;
                };
                if predecessors[idx].contains(&dep_idx) {
                    continue;
                }
                predecessors[idx].push(dep_idx);
                successors[dep_idx as usize].push(idx as TaskIdx);
            }
        }

        Ok(Self {
            index,
            durations,
            releases,
            predecessors,
            successors,
            anchor,
        })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Id of a task index issued by this graph ("" for a foreign index).
    pub fn id(&self, idx: TaskIdx) -> &str {
        self.index.resolve(idx).unwrap_or_default()
    }

    /// Sum of all effective durations, including tasks later excluded by a cycle.
    pub fn total_work(&self) -> f64 {
        self.durations.iter().sum()
    }
}

fn effective_duration(
    task: &Task,
    policy: DurationPolicy,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<f64, CpmError> {
    // NaN falls through to the non-positive branch
    if task.duration > 0.0 {
        return Ok(task.duration);
    }

    let applied = match policy {
        // NaN would poison every later start in the serial schedule
        DurationPolicy::Preserve if task.duration.is_nan() => 0.0,
        DurationPolicy::Preserve => task.duration,
        DurationPolicy::Clamp => 0.0,
        DurationPolicy::Reject => {
            return Err(CpmError::NonPositiveDuration {
                task_id: task.id.clone(),
                duration: task.duration,
            })
        }
    };

    diagnostics.push(Diagnostic::NonPositiveDuration {
        task_id: task.id.clone(),
        duration: task.duration,
        applied,
    });
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn make_task(id: &str, duration: f64, deps: Vec<&str>) -> Task {
        Task::new(id, duration, at(8)).depends_on_all(deps)
    }

    fn build(tasks: &[Task]) -> (TaskGraph, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let graph = TaskGraph::build(tasks, DurationPolicy::Preserve, &mut diagnostics).unwrap();
        (graph, diagnostics)
    }

    #[test]
    fn test_adjacency_both_directions() {
        let tasks = vec![
            make_task("a", 1.0, vec![]),
            make_task("b", 1.0, vec!["a"]),
            make_task("c", 1.0, vec!["a", "b"]),
        ];
        let (graph, diagnostics) = build(&tasks);

        assert!(diagnostics.is_empty());
        assert_eq!(graph.predecessors, vec![vec![], vec![0], vec![0, 1]]);
        assert_eq!(graph.successors, vec![vec![1, 2], vec![2], vec![]]);
    }

    #[test]
    fn test_forward_reference_resolves() {
        // Dependency declared before the task it names
        let tasks = vec![make_task("b", 1.0, vec!["a"]), make_task("a", 1.0, vec![])];
        let (graph, diagnostics) = build(&tasks);

        assert!(diagnostics.is_empty());
        assert_eq!(graph.predecessors[0], vec![1]);
    }

    #[test]
    fn test_dangling_dependency_dropped() {
        let tasks = vec![make_task("a", 1.0, vec!["deleted"])];
        let (graph, diagnostics) = build(&tasks);

        assert!(graph.predecessors[0].is_empty());
        assert_eq!(
            diagnostics,
            vec![Diagnostic::DanglingDependency {
                task_id: "a".to_string(),
                dependency_id: "deleted".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicate_dependency_collapsed() {
        let tasks = vec![
            make_task("a", 1.0, vec![]),
            make_task("b", 1.0, vec!["a", "a"]),
        ];
        let (graph, _) = build(&tasks);

        assert_eq!(graph.predecessors[1], vec![0]);
        assert_eq!(graph.successors[0], vec![1]);
    }

    #[test]
    fn test_duplicate_task_keeps_first() {
        let tasks = vec![make_task("a", 2.0, vec![]), make_task("a", 9.0, vec![])];
        let (graph, diagnostics) = build(&tasks);

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.durations, vec![2.0]);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::DuplicateTask {
                task_id: "a".to_string()
            }]
        );
    }

    #[test]
    fn test_anchor_and_releases() {
        let tasks = vec![
            Task::new("late", 1.0, at(14)),
            Task::new("early", 1.0, at(8)),
        ];
        let (graph, _) = build(&tasks);

        assert_eq!(graph.anchor, Some(at(8)));
        assert!((graph.releases[0] - 6.0).abs() < 1e-9);
        assert!(graph.releases[1].abs() < 1e-9);
    }

    #[test]
    fn test_empty_task_set() {
        let (graph, diagnostics) = build(&[]);
        assert!(graph.is_empty());
        assert!(graph.anchor.is_none());
        assert!(diagnostics.is_empty());
        assert_eq!(graph.total_work(), 0.0);
    }

    #[test]
    fn test_duration_policies() {
        let tasks = vec![make_task("zero", 0.0, vec![]), make_task("neg", -2.0, vec![])];

        let (graph, diagnostics) = build(&tasks);
        assert_eq!(graph.durations, vec![0.0, -2.0]);
        assert_eq!(diagnostics.len(), 2);

        let mut diagnostics = Vec::new();
        let graph = TaskGraph::build(&tasks, DurationPolicy::Clamp, &mut diagnostics).unwrap();
        assert_eq!(graph.durations, vec![0.0, 0.0]);
        assert!(matches!(
            diagnostics[1],
            Diagnostic::NonPositiveDuration { applied, .. } if applied == 0.0
        ));

        let err = TaskGraph::build(&tasks, DurationPolicy::Reject, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CpmError::NonPositiveDuration { ref task_id, .. } if task_id == "zero"));
    }
}
