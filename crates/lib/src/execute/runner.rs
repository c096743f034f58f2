//! Sequential execution of a planned [`BuildSet`].
//!
//! Units run in dependency order: every proto unit, then every pre-built
//! library copy, then each target's compile commands followed by its link or
//! archive command, and finally the unit tests when requested. The first
//! failure stops the run.

use tracing::{debug, error, info};

use crate::command::{CommandChain, mkdir_p};
use crate::execute::cmd::CommandExecutor;
use crate::execute::plan::{BuildSet, is_prebuilt};
use crate::execute::types::ExecuteError;
use crate::proto::{ProtoError, ProtoOutcome, ProtoState};
use crate::target::{Target, TargetError};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
  /// Run unit-test invocations after every target is built.
  pub run_tests: bool,
  /// Log command output at info level.
  pub verbose: bool,
}

/// The error that stopped a run, tagged with the unit it came from.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
  #[error("proto library failed: {0}")]
  Proto(#[from] ProtoError),

  #[error(transparent)]
  Target(#[from] TargetError),

  #[error("{unit}: {source}")]
  Command {
    unit: String,
    #[source]
    source: ExecuteError,
  },
}

#[derive(Debug, Default)]
pub struct BuildReport {
  pub protos_generated: usize,
  pub libraries_copied: usize,
  pub targets_built: usize,
  pub tests_passed: usize,
  /// Failure that stopped the run, if any.
  pub failed: Option<RunError>,
}

impl BuildReport {
  pub fn is_success(&self) -> bool {
    self.failed.is_none()
  }
}

/// Execute `set` through `executor`.
///
/// Always returns a report; a failure is recorded in [`BuildReport::failed`]
/// together with the counts reached before it.
pub fn run_build(set: &mut BuildSet, executor: &dyn CommandExecutor, options: RunOptions) -> BuildReport {
  let mut report = BuildReport::default();
  if let Err(err) = run_phases(set, executor, options, &mut report) {
    error!("{}", err);
    report.failed = Some(err);
  }
  report
}

fn run_phases(
  set: &mut BuildSet,
  executor: &dyn CommandExecutor,
  options: RunOptions,
  report: &mut BuildReport,
) -> Result<(), RunError> {
  for unit in &mut set.protos {
    match unit.state() {
      ProtoState::Pending => unit.pre_action(executor)?,
      ProtoState::CommandsComputed => unit.execute(executor)?,
      ProtoState::Executed(ProtoOutcome::Success) => {
        debug!("skipping proto library that already ran");
        continue;
      }
      ProtoState::Executed(ProtoOutcome::Failed) => {
        let protos: Vec<_> = unit.protos().iter().map(|p| p.display().to_string()).collect();
        return Err(ProtoError::PreviouslyFailed {
          protos: protos.join(" "),
        }
        .into());
      }
    }
    report.protos_generated += 1;
  }

  for target in set.targets.iter().filter(|t| is_prebuilt(t)) {
    target.precopy(executor)?;
    report.libraries_copied += 1;
  }

  for target in set.targets.iter_mut().filter(|t| !is_prebuilt(t)) {
    if target.builder().is_none() {
      target.action();
    }
    build_target(target, executor, options.verbose)?;
    report.targets_built += 1;
  }

  if options.run_tests {
    for target in &set.targets {
      if let Some(cmd) = target.test_invocation() {
        info!(test = %target.name(), "running unit test");
        run_checked(executor, target.name(), cmd, true)?;
        report.tests_passed += 1;
      }
    }
  }

  Ok(())
}

fn build_target(target: &Target, executor: &dyn CommandExecutor, verbose: bool) -> Result<(), RunError> {
  info!(unit = %target.name(), kind = target.kind_name(), "building");

  for compile in target.compile_commands() {
    run_checked(executor, target.name(), &compile.to_string(), verbose)?;
  }

  if let Some(builder) = target.builder() {
    let mut chain = CommandChain::new();
    if let Some(dir) = builder.output().parent() {
      chain = chain.then(mkdir_p(dir));
    }
    let chain = chain.then(builder.command_line());
    run_checked(executor, target.name(), &chain.to_string(), verbose)?;
  }
  Ok(())
}

fn run_checked(executor: &dyn CommandExecutor, unit: &str, cmd: &str, verbose: bool) -> Result<(), RunError> {
  executor
    .run(cmd, verbose)
    .and_then(|output| output.check(cmd))
    .map(|_| ())
    .map_err(|source| RunError::Command {
      unit: unit.to_string(),
      source,
    })
}
