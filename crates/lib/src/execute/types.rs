//! Types for command execution.

use thiserror::Error;

/// Errors that can occur while running a planned command.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// The command ran and exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}\n{output}")]
  CmdFailed {
    cmd: String,
    code: Option<i32>,
    output: String,
  },

  /// The shell could not be spawned.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Exit status and combined stdout/stderr of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
  /// Exit code, `None` when the process was killed by a signal.
  pub code: Option<i32>,
  pub output: String,
}

impl CommandOutput {
  pub fn ok(output: impl Into<String>) -> Self {
    Self {
      code: Some(0),
      output: output.into(),
    }
  }

  pub fn success(&self) -> bool {
    self.code == Some(0)
  }

  /// Turn a non-zero exit into [`ExecuteError::CmdFailed`] for `cmd`.
  pub fn check(self, cmd: &str) -> Result<Self, ExecuteError> {
    if self.success() {
      Ok(self)
    } else {
      Err(ExecuteError::CmdFailed {
        cmd: cmd.to_string(),
        code: self.code,
        output: self.output,
      })
    }
  }
}
