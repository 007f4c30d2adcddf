//! Resource-constrained serial scheduler.
//!
//! A single worker executes one task at a time. Among the tasks whose
//! predecessors have all been scheduled, the one with the least logical
//! flexibility goes first.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::interner::TaskIdx;
use crate::log_steps;

use super::calculation::LogicalTimings;
use super::graph::TaskGraph;
use super::types::ScheduledSlot;

/// Priority of a ready task. Lower sorts first.
///
/// Order: smallest logical late start, then longest duration, then input order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadyKey {
    pub late_start: f64,
    pub duration: f64,
    pub idx: TaskIdx,
}

impl Eq for ReadyKey {}

impl Ord for ReadyKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.late_start
            .total_cmp(&other.late_start)
            .then(other.duration.total_cmp(&self.duration))
            .then(self.idx.cmp(&other.idx))
    }
}

impl PartialOrd for ReadyKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of the serial scheduling pass.
#[derive(Clone, Debug, Default)]
pub struct SerialSchedule {
    /// Indexed by task; `None` for tasks that never became ready.
    pub slots: Vec<Option<ScheduledSlot>>,
    /// Tasks in execution order.
    pub order: Vec<TaskIdx>,
    /// Resource time after the last task (0 when nothing ran).
    pub makespan: f64,
}

/// Serial scheduler for one engine run.
pub struct SerialScheduler<'a> {
    graph: &'a TaskGraph,
    logical: &'a LogicalTimings,
    verbosity: u8,
}

impl<'a> SerialScheduler<'a> {
    pub fn new(graph: &'a TaskGraph, logical: &'a LogicalTimings, verbosity: u8) -> Self {
        Self {
            graph,
            logical,
            verbosity,
        }
    }

    fn ready_key(&self, idx: TaskIdx) -> ReadyKey {
        // Tasks without a logical timing never become ready; sort them last anyway
        let late_start = self
            .logical
            .get(idx)
            .map(|t| t.latest_start)
            .unwrap_or(f64::MAX);
        ReadyKey {
            late_start,
            duration: self.graph.durations[idx as usize],
            idx,
        }
    }

    /// Run the scheduling loop until no task is ready.
    pub fn schedule(&self) -> SerialSchedule {
        let graph = self.graph;
        let n = graph.len();

        let mut remaining_preds: Vec<usize> = graph.predecessors.iter().map(Vec::len).collect();
        let mut ready: BinaryHeap<Reverse<ReadyKey>> = (0..n as TaskIdx)
            .filter(|&idx| remaining_preds[idx as usize] == 0)
            .map(|idx| Reverse(self.ready_key(idx)))
            .collect();

        let mut slots: Vec<Option<ScheduledSlot>> = vec![None; n];
        let mut order: Vec<TaskIdx> = Vec::with_capacity(n);
        let mut current_time = 0.0;

        while let Some(Reverse(key)) = ready.pop() {
            let i = key.idx as usize;
            let release = graph.releases[i];
            let start = if release > current_time {
                release
            } else {
                current_time
            };
            let finish = start + graph.durations[i];

            log_steps!(
                self.verbosity,
                "[cpm] Scheduled {} at {:.3}-{:.3} (late_start={:.3}, ready={})",
                graph.id(key.idx),
                start,
                finish,
                key.late_start,
                ready.len()
            );

            slots[i] = Some(ScheduledSlot { start, finish });
            order.push(key.idx);
            current_time = finish;

            for &succ in &graph.successors[i] {
                let remaining = &mut remaining_preds[succ as usize];
                *remaining -= 1;
                if *remaining == 0 {
                    ready.push(Reverse(self.ready_key(succ)));
                }
            }
        }

        SerialSchedule {
            slots,
            order,
            makespan: current_time,
        }
    }
}
