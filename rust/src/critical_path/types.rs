//! Internal timing types shared by the engine passes.

/// Per-task timing from the logical (unlimited-resource) pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: f64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: f64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: f64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: f64,
    /// Slack = latest_start - earliest_start.
    pub slack: f64,
}

impl TaskTiming {
    pub fn is_critical(&self, epsilon: f64) -> bool {
        self.slack.abs() < epsilon
    }
}

/// Serial schedule window for one task.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScheduledSlot {
    pub start: f64,
    pub finish: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_timing_critical() {
        let timing = TaskTiming {
            earliest_start: 0.0,
            earliest_finish: 5.0,
            latest_start: 0.0004,
            latest_finish: 5.0004,
            slack: 0.0004,
        };
        assert!(timing.is_critical(1e-3));
        assert!(!timing.is_critical(1e-4));

        let timing_with_slack = TaskTiming {
            slack: 2.0,
            ..timing
        };
        assert!(!timing_with_slack.is_critical(1e-3));
    }
}
