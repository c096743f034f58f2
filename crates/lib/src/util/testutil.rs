//! Test utilities for broc-lib.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::execute::{CommandExecutor, CommandOutput, ExecuteError};

/// Executor that records every command instead of running it.
///
/// Scripted results are returned in order; once exhausted every command
/// succeeds with empty output.
#[derive(Default)]
pub struct RecordingExecutor {
  commands: Mutex<Vec<String>>,
  results: Mutex<VecDeque<CommandOutput>>,
}

impl RecordingExecutor {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_result(self, result: CommandOutput) -> Self {
    self.results.lock().unwrap().push_back(result);
    self
  }

  pub fn commands(&self) -> Vec<String> {
    self.commands.lock().unwrap().clone()
  }
}

impl CommandExecutor for RecordingExecutor {
  fn run(&self, cmd: &str, _verbose: bool) -> Result<CommandOutput, ExecuteError> {
    self.commands.lock().unwrap().push(cmd.to_string());
    Ok(
      self
        .results
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| CommandOutput::ok("")),
    )
  }
}
