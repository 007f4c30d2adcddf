//! Engine entry points tying the passes together.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::{ConfigError, EngineConfig};
use crate::diagnostics::Diagnostic;
use crate::models::{CpmResult, Task, TimingResult};
use crate::{log_summary, log_trace};

use super::calculation::calculate_logical_timings;
use super::graph::TaskGraph;
use super::reconstruct::reconstruct_critical_path;
use super::scheduler::SerialScheduler;
use super::topo::topological_sort;

/// Errors that stop a computation. Only reachable through configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CpmError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("Task {task_id} has non-positive duration {duration}")]
    NonPositiveDuration { task_id: String, duration: f64 },
}

/// Compute logical timing, the serial schedule and the critical path with the
/// default configuration.
///
/// Never fails: cycles, dangling dependencies and degenerate durations are
/// reported through [`CpmResult::diagnostics`].
pub fn compute_critical_path(tasks: &[Task]) -> CpmResult {
    compute_critical_path_with_config(tasks, &EngineConfig::default()).unwrap_or_default()
}

/// Compute logical timing, the serial schedule and the critical path.
///
/// # Errors
/// * `CpmError::InvalidConfig` if the configuration fails validation
/// * `CpmError::NonPositiveDuration` if a task has a duration <= 0 and the
///   policy is [`crate::DurationPolicy::Reject`]
pub fn compute_critical_path_with_config(
    tasks: &[Task],
    config: &EngineConfig,
) -> Result<CpmResult, CpmError> {
    config.validate()?;
    let verbosity = config.verbosity;

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let graph = TaskGraph::build(tasks, config.duration_policy, &mut diagnostics)?;

    let topo = topological_sort(&graph);
    if topo.has_cycle() {
        diagnostics.push(Diagnostic::CycleDetected {
            task_ids: topo
                .excluded
                .iter()
                .map(|&idx| graph.id(idx).to_string())
                .collect(),
        });
    }

    let logical = calculate_logical_timings(&graph, &topo, verbosity);
    let schedule = SerialScheduler::new(&graph, &logical, verbosity).schedule();
    let critical = reconstruct_critical_path(&graph, &logical, config.epsilon);

    let mut task_data: FxHashMap<String, TimingResult> =
        FxHashMap::with_capacity_and_hasher(topo.order.len(), Default::default());
    for &idx in &topo.order {
        let i = idx as usize;
        let (Some(timing), Some(slot)) = (logical.timings[i], schedule.slots[i]) else {
            log_trace!(verbosity, "[cpm] {} has no timing, skipped", graph.id(idx));
            continue;
        };
        task_data.insert(
            graph.id(idx).to_string(),
            TimingResult {
                duration: graph.durations[i],
                early_start: timing.earliest_start,
                early_finish: timing.earliest_finish,
                late_start: timing.latest_start,
                late_finish: timing.latest_finish,
                float: timing.slack,
                is_critical: timing.is_critical(config.epsilon),
                scheduled_start: slot.start,
                scheduled_finish: slot.finish,
            },
        );
    }

    let result = CpmResult {
        task_data,
        critical_path: critical
            .iter()
            .map(|&idx| graph.id(idx).to_string())
            .collect(),
        execution_order: schedule
            .order
            .iter()
            .map(|&idx| graph.id(idx).to_string())
            .collect(),
        project_anchor: graph.anchor,
        project_duration: schedule.makespan,
        logical_duration: logical.logical_duration,
        total_work: graph.total_work(),
        diagnostics,
    };

    log_summary!(
        verbosity,
        "[cpm] {} tasks, {} scheduled, {} critical; duration={:.3}h (logical {:.3}h), work={:.3}h",
        graph.len(),
        result.execution_order.len(),
        result.critical_path.len(),
        result.project_duration,
        result.logical_duration,
        result.total_work
    );
    for diagnostic in &result.diagnostics {
        log_summary!(verbosity, "[cpm] warning: {}", diagnostic);
    }

    Ok(result)
}
