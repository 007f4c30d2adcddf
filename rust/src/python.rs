//! Python bindings (`cpm_engine` module).

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDateTime;
use pyo3::prelude::*;
use std::collections::HashMap;

use crate::config::{DurationPolicy, EngineConfig};
use crate::models::{CpmResult, Task, TimingResult};

// Note: We use std HashMap here for PyO3 interface compatibility

/// A task to be scheduled (PyO3 wrapper).
#[pyclass(name = "Task")]
#[derive(Clone, Debug)]
pub struct PyTask {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub duration: f64,
    #[pyo3(get, set)]
    pub earliest_start: NaiveDateTime,
    #[pyo3(get, set)]
    pub dependencies: Vec<String>,
}

#[pymethods]
impl PyTask {
    #[new]
    #[pyo3(signature = (id, duration, earliest_start, dependencies=None))]
    fn new(
        id: String,
        duration: f64,
        earliest_start: NaiveDateTime,
        dependencies: Option<Vec<String>>,
    ) -> Self {
        Self {
            id,
            duration,
            earliest_start,
            dependencies: dependencies.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, duration={}, earliest_start={}, deps={})",
            self.id,
            self.duration,
            self.earliest_start,
            self.dependencies.len()
        )
    }
}

impl From<&PyTask> for Task {
    fn from(task: &PyTask) -> Self {
        Task {
            id: task.id.clone(),
            duration: task.duration,
            earliest_start: task.earliest_start,
            dependencies: task.dependencies.clone(),
        }
    }
}

/// Engine configuration (PyO3 wrapper).
#[pyclass(name = "EngineConfig")]
#[derive(Clone, Debug)]
pub struct PyEngineConfig {
    #[pyo3(get, set)]
    pub epsilon: f64,
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// "preserve", "clamp" or "reject"
    #[pyo3(get, set)]
    pub duration_policy: String,
}

#[pymethods]
impl PyEngineConfig {
    #[new]
    #[pyo3(signature = (epsilon=None, verbosity=None, duration_policy=None))]
    fn new(epsilon: Option<f64>, verbosity: Option<u8>, duration_policy: Option<String>) -> Self {
        let defaults = EngineConfig::default();
        Self {
            epsilon: epsilon.unwrap_or(defaults.epsilon),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            duration_policy: duration_policy
                .unwrap_or_else(|| defaults.duration_policy.as_str().to_string()),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "EngineConfig(epsilon={}, verbosity={}, duration_policy={:?})",
            self.epsilon, self.verbosity, self.duration_policy
        )
    }
}

impl TryFrom<&PyEngineConfig> for EngineConfig {
    type Error = crate::config::ConfigError;

    fn try_from(config: &PyEngineConfig) -> Result<Self, Self::Error> {
        Ok(EngineConfig {
            epsilon: config.epsilon,
            verbosity: config.verbosity,
            duration_policy: config.duration_policy.parse::<DurationPolicy>()?,
        })
    }
}

/// Per-task timing (PyO3 wrapper). Offsets are hours from the project anchor.
#[pyclass(name = "TimingResult")]
#[derive(Clone, Debug)]
pub struct PyTimingResult {
    #[pyo3(get)]
    pub duration: f64,
    #[pyo3(get)]
    pub early_start: f64,
    #[pyo3(get)]
    pub early_finish: f64,
    #[pyo3(get)]
    pub late_start: f64,
    #[pyo3(get)]
    pub late_finish: f64,
    #[pyo3(get)]
    pub float: f64,
    #[pyo3(get)]
    pub is_critical: bool,
    #[pyo3(get)]
    pub scheduled_start: f64,
    #[pyo3(get)]
    pub scheduled_finish: f64,
}

#[pymethods]
impl PyTimingResult {
    fn __repr__(&self) -> String {
        format!(
            "TimingResult(es={}, ls={}, float={}, scheduled={}-{})",
            self.early_start,
            self.late_start,
            self.float,
            self.scheduled_start,
            self.scheduled_finish
        )
    }
}

impl From<&TimingResult> for PyTimingResult {
    fn from(t: &TimingResult) -> Self {
        Self {
            duration: t.duration,
            early_start: t.early_start,
            early_finish: t.early_finish,
            late_start: t.late_start,
            late_finish: t.late_finish,
            float: t.float,
            is_critical: t.is_critical,
            scheduled_start: t.scheduled_start,
            scheduled_finish: t.scheduled_finish,
        }
    }
}

/// Result of a CPM computation (PyO3 wrapper).
#[pyclass(name = "CpmResult")]
#[derive(Clone, Debug)]
pub struct PyCpmResult {
    #[pyo3(get)]
    pub task_data: HashMap<String, PyTimingResult>,
    #[pyo3(get)]
    pub critical_path: Vec<String>,
    #[pyo3(get)]
    pub execution_order: Vec<String>,
    #[pyo3(get)]
    pub project_anchor: Option<NaiveDateTime>,
    #[pyo3(get)]
    pub project_duration: f64,
    #[pyo3(get)]
    pub logical_duration: f64,
    #[pyo3(get)]
    pub total_work: f64,
    /// Human-readable diagnostics.
    #[pyo3(get)]
    pub diagnostics: Vec<String>,
    #[pyo3(get)]
    pub cyclic_tasks: Vec<String>,
}

#[pymethods]
impl PyCpmResult {
    fn __repr__(&self) -> String {
        format!(
            "CpmResult(tasks={}, critical={}, project_duration={}, diagnostics={})",
            self.task_data.len(),
            self.critical_path.len(),
            self.project_duration,
            self.diagnostics.len()
        )
    }
}

impl From<CpmResult> for PyCpmResult {
    fn from(result: CpmResult) -> Self {
        Self {
            task_data: result
                .task_data
                .iter()
                .map(|(id, t)| (id.clone(), PyTimingResult::from(t)))
                .collect(),
            cyclic_tasks: result.cyclic_tasks().to_vec(),
            diagnostics: result.diagnostics.iter().map(|d| d.to_string()).collect(),
            critical_path: result.critical_path,
            execution_order: result.execution_order,
            project_anchor: result.project_anchor,
            project_duration: result.project_duration,
            logical_duration: result.logical_duration,
            total_work: result.total_work,
        }
    }
}

/// Compute logical timing, the serial schedule and the critical path.
///
/// # Raises
/// * ValueError for an invalid config, or a non-positive duration under the
///   "reject" policy
#[pyfunction]
#[pyo3(name = "compute_critical_path", signature = (tasks, config=None))]
fn py_compute_critical_path(
    tasks: Vec<PyTask>,
    config: Option<PyEngineConfig>,
) -> PyResult<PyCpmResult> {
    let config = match config {
        Some(c) => EngineConfig::try_from(&c)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?,
        None => EngineConfig::default(),
    };
    let tasks: Vec<Task> = tasks.iter().map(Task::from).collect();

    match crate::compute_critical_path_with_config(&tasks, &config) {
        Ok(result) => Ok(result.into()),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// The cpm_engine Python module.
#[pymodule]
fn cpm_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTask>()?;
    m.add_class::<PyEngineConfig>()?;
    m.add_class::<PyTimingResult>()?;
    m.add_class::<PyCpmResult>()?;

    m.add_function(wrap_pyfunction!(py_compute_critical_path, m)?)?;

    Ok(())
}
