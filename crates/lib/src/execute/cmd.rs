//! Running planned commands through a shell.
//!
//! Planning code only needs the [`CommandExecutor`] trait; [`ShellExecutor`]
//! is the implementation that actually spawns processes.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::execute::types::{CommandOutput, ExecuteError};

/// Runs one shell command to completion.
///
/// Calls are synchronous and independent of each other. An implementation
/// reports a non-zero exit through [`CommandOutput::code`], not as an error;
/// `Err` is reserved for failing to run the command at all.
pub trait CommandExecutor {
  fn run(&self, cmd: &str, verbose: bool) -> Result<CommandOutput, ExecuteError>;
}

/// Executes commands with the platform shell (`/bin/sh -c` on unix,
/// `cmd.exe /C` on windows) from a fixed working directory. `$SHELL` is not
/// consulted.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
  cwd: PathBuf,
}

#[cfg(unix)]
const SHELL: (&str, &str) = ("/bin/sh", "-c");

#[cfg(windows)]
const SHELL: (&str, &str) = ("cmd.exe", "/C");

impl ShellExecutor {
  pub fn new(cwd: impl Into<PathBuf>) -> Self {
    Self { cwd: cwd.into() }
  }

  pub fn cwd(&self) -> &Path {
    &self.cwd
  }
}

impl CommandExecutor for ShellExecutor {
  fn run(&self, cmd: &str, verbose: bool) -> Result<CommandOutput, ExecuteError> {
    let (shell, flag) = SHELL;
    debug!(shell, cwd = ?self.cwd, cmd = %cmd, "spawning process");

    let output = Command::new(shell).arg(flag).arg(cmd).current_dir(&self.cwd).output()?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !combined.is_empty() {
      if verbose {
        info!("{}", combined.trim_end());
      } else {
        debug!(output = %combined.trim_end(), "command output");
      }
    }

    Ok(CommandOutput {
      code: output.status.code(),
      output: combined,
    })
  }
}
