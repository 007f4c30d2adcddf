//! Core data types for the CPM engine.

use chrono::{Duration, NaiveDateTime};
use rustc_hash::FxHashMap;

use crate::diagnostics::Diagnostic;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Hours from `anchor` to `instant` (negative if `instant` is earlier).
pub fn hours_between(anchor: NaiveDateTime, instant: NaiveDateTime) -> f64 {
    (instant - anchor).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// A task to be scheduled.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub id: String,
    /// Hours of work.
    pub duration: f64,
    /// The task may not begin before this instant.
    pub earliest_start: NaiveDateTime,
    /// Finish-to-start predecessors by id.
    pub dependencies: Vec<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, duration: f64, earliest_start: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            duration,
            earliest_start,
            dependencies: Vec::new(),
        }
    }

    /// Adds a dependency on another task.
    pub fn depends_on(mut self, dep_id: impl Into<String>) -> Self {
        self.dependencies.push(dep_id.into());
        self
    }

    /// Adds several dependencies at once.
    pub fn depends_on_all(mut self, deps: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.dependencies.extend(deps.into_iter().map(Into::into));
        self
    }
}

/// Per-task timing computed by one engine run. All values are hours from the
/// project anchor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimingResult {
    /// Effective duration after the duration policy was applied.
    pub duration: f64,
    pub early_start: f64,
    pub early_finish: f64,
    pub late_start: f64,
    pub late_finish: f64,
    /// late_start - early_start.
    pub float: f64,
    pub is_critical: bool,
    /// Start under the single-resource serial schedule.
    pub scheduled_start: f64,
    /// Finish under the single-resource serial schedule.
    pub scheduled_finish: f64,
}

/// Aggregate output of [`crate::compute_critical_path`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CpmResult {
    /// Timing per schedulable task. Tasks excluded by a cycle are absent.
    pub task_data: FxHashMap<String, TimingResult>,
    /// Critical tasks linearized by depth-first traversal from the roots.
    pub critical_path: Vec<String>,
    /// Task ids in the order the serial scheduler executed them.
    pub execution_order: Vec<String>,
    /// Earliest `earliest_start` of all tasks; `None` for an empty task set.
    pub project_anchor: Option<NaiveDateTime>,
    /// Final resource time of the serial schedule.
    pub project_duration: f64,
    /// Longest dependency chain with unlimited resources.
    pub logical_duration: f64,
    /// Sum of all task durations.
    pub total_work: f64,
    pub diagnostics: Vec<Diagnostic>,
}

impl CpmResult {
    pub fn timing(&self, task_id: &str) -> Option<&TimingResult> {
        self.task_data.get(task_id)
    }

    /// False for tasks that were excluded (cycle members and their dependents)
    /// or never part of the input.
    pub fn is_schedulable(&self, task_id: &str) -> bool {
        self.task_data.contains_key(task_id)
    }

    pub fn has_cycle(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::CycleDetected { .. }))
    }

    /// Ids excluded from the computation because of a dependency cycle.
    pub fn cyclic_tasks(&self) -> &[String] {
        self.diagnostics
            .iter()
            .find_map(|d| match d {
                Diagnostic::CycleDetected { task_ids } => Some(task_ids.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Iterate critical tasks in critical path order.
    pub fn critical_tasks(&self) -> impl Iterator<Item = (&str, &TimingResult)> {
        self.critical_path
            .iter()
            .filter_map(|id| self.task_data.get(id).map(|t| (id.as_str(), t)))
    }

    /// Share of the serial schedule spent working (1.0 = never idle).
    pub fn utilization(&self) -> f64 {
        if self.project_duration > 0.0 {
            self.total_work / self.project_duration
        } else {
            0.0
        }
    }

    /// Convert an hour offset back to wall-clock time.
    pub fn offset_to_datetime(&self, hours: f64) -> Option<NaiveDateTime> {
        let anchor = self.project_anchor?;
        let millis = (hours * MILLIS_PER_HOUR).round() as i64;
        anchor.checked_add_signed(Duration::milliseconds(millis))
    }

    /// Serial schedule window of a task as wall-clock times.
    pub fn scheduled_window(&self, task_id: &str) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let timing = self.task_data.get(task_id)?;
        Some((
            self.offset_to_datetime(timing.scheduled_start)?,
            self.offset_to_datetime(timing.scheduled_finish)?,
        ))
    }
}
