//! Critical Path Method scheduling engine.
//!
//! Given tasks with durations, earliest-start constraints and finish-to-start
//! dependencies, computes logical early/late timing, float, the critical path,
//! and a single-resource serial schedule.
//!
//! The engine is a pure function of its input: see [`compute_critical_path`].

pub mod config;
pub mod critical_path;
pub mod diagnostics;
mod interner;
pub mod logging;
mod models;
#[cfg(feature = "python")]
mod python;

pub use config::{ConfigError, DurationPolicy, EngineConfig};
pub use critical_path::{compute_critical_path, compute_critical_path_with_config, CpmError};
pub use diagnostics::Diagnostic;
pub use interner::{TaskIdInterner, TaskIdx};
pub use models::{hours_between, CpmResult, Task, TimingResult};
