//! Non-fatal conditions reported alongside a computation result.

use std::fmt;

/// A degraded-input condition the engine tolerated.
///
/// None of these abort a computation; callers decide whether to surface them.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// Tasks that never reached in-degree zero: cycle members and everything
    /// downstream of them. Listed in input order.
    CycleDetected { task_ids: Vec<String> },
    /// A dependency naming a task that is not in the task set.
    DanglingDependency { task_id: String, dependency_id: String },
    /// A later task reused an id already taken; it was dropped.
    DuplicateTask { task_id: String },
    /// Duration was zero, negative or NaN. `applied` is the duration used.
    NonPositiveDuration {
        task_id: String,
        duration: f64,
        applied: f64,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycleDetected { task_ids } => write!(
                f,
                "Circular dependency detected; excluded tasks: {}",
                task_ids.join(", ")
            ),
            Self::DanglingDependency {
                task_id,
                dependency_id,
            } => write!(
                f,
                "Task {} depends on unknown task {} (ignored)",
                task_id, dependency_id
            ),
            Self::DuplicateTask { task_id } => {
                write!(f, "Duplicate task id {} (later definition ignored)", task_id)
            }
            Self::NonPositiveDuration {
                task_id,
                duration,
                applied,
            } => write!(
                f,
                "Task {} has non-positive duration {} (using {})",
                task_id, duration, applied
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let cycle = Diagnostic::CycleDetected {
            task_ids: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            cycle.to_string(),
            "Circular dependency detected; excluded tasks: a, b"
        );

        let dangling = Diagnostic::DanglingDependency {
            task_id: "a".to_string(),
            dependency_id: "gone".to_string(),
        };
        assert!(dangling.to_string().contains("gone"));
    }
}
