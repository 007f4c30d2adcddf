//! Critical path method engine.
//!
//! Passes run in order: graph build, topological sort, logical forward and
//! backward passes, serial scheduling, critical path reconstruction. Every
//! pass is a pure function of its inputs; nothing is kept between runs.

mod calculation;
mod engine;
mod graph;
mod reconstruct;
mod scheduler;
mod topo;
mod types;

pub use calculation::{calculate_logical_timings, LogicalTimings};
pub use engine::{compute_critical_path, compute_critical_path_with_config, CpmError};
pub use graph::TaskGraph;
pub use reconstruct::reconstruct_critical_path;
pub use scheduler::{ReadyKey, SerialSchedule, SerialScheduler};
pub use topo::{topological_sort, TopoOrder};
pub use types::{ScheduledSlot, TaskTiming};
