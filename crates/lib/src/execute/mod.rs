//! Planning and running a module's build.
//!
//! This module ties the planning types together and runs their commands:
//! - [`CommandExecutor`]: the process-spawning collaborator
//! - [`BuildSet`]: every unit of a module, planned in one pass
//! - [`run_build`]: sequential execution in dependency order

pub mod cmd;
pub mod plan;
pub mod runner;
pub mod types;

pub use cmd::{CommandExecutor, ShellExecutor};
pub use plan::{BuildSet, PlanSummary, ProtoPlan, TargetPlan, is_prebuilt};
pub use runner::{BuildReport, RunError, RunOptions, run_build};
pub use types::{CommandOutput, ExecuteError};
