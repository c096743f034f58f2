//! Implementation of the `broc build` command.
//!
//! Plans the manifest and runs it through a shell rooted at the workspace:
//! proto libraries first, then pre-built library copies, then every target,
//! then unit tests when `--test` is given.

use std::path::Path;
use std::time::Instant;

use anyhow::{Result, bail};
use tracing::info;

use broc_lib::execute::{RunOptions, ShellExecutor, run_build};

use crate::output::{format_duration, print_error, print_stat, print_success, print_warning};

pub fn cmd_build(manifest: &Path, workspace: Option<&Path>, run_tests: bool, verbose: bool) -> Result<()> {
  let mut set = super::load_build_set(manifest, workspace)?;

  if set.protos.is_empty() && set.targets.is_empty() {
    print_warning("Nothing to build");
    return Ok(());
  }

  let executor = ShellExecutor::new(set.env.workspace());
  info!(workspace = %executor.cwd().display(), "starting build");

  let start = Instant::now();
  let report = run_build(&mut set, &executor, RunOptions { run_tests, verbose });
  let elapsed = start.elapsed();

  if let Some(ref err) = report.failed {
    print_error(&format!("Build failed: {}", err));
  } else {
    print_success("Build complete");
  }
  print_stat("Proto libraries generated", &report.protos_generated.to_string());
  print_stat("Libraries copied", &report.libraries_copied.to_string());
  print_stat("Targets built", &report.targets_built.to_string());
  if run_tests {
    print_stat("Tests passed", &report.tests_passed.to_string());
  }
  print_stat("Duration", &format_duration(elapsed));

  if !report.is_success() {
    bail!("build of {} failed", manifest.display());
  }
  Ok(())
}
