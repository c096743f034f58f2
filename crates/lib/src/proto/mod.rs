//! Protocol buffer code generation.
//!
//! A [`ProtoCodegenUnit`] runs `protoc` over a group of `.proto` files of one
//! module, producing C++ sources that targets of the module compile later.
//! It is not a target: it produces no archive or binary, and every unit must
//! reach [`ProtoState::Executed`] with success before any target consuming
//! its output is planned.
//!
//! ```text
//! Pending --compute_commands--> CommandsComputed --execute--> Executed(Success | Failed)
//! ```
//!
//! A unit runs once; calling into it again after execution is an error.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::command::{CommandChain, CommandLine, mkdir_p};
use crate::env::Environment;
use crate::execute::{CommandExecutor, ExecuteError};
use crate::util::path::{first_segment, normalize};

#[derive(Debug, Error)]
pub enum ProtoError {
  #[error("proto library declares no proto files")]
  NoProtoFiles,

  #[error("proto commands have not been computed")]
  NotComputed,

  #[error("proto library has already been executed")]
  AlreadyExecuted,

  #[error("proto library {protos} failed in an earlier run")]
  PreviouslyFailed { protos: String },

  #[error("{cmd}\n{output}")]
  CommandFailed {
    cmd: String,
    code: Option<i32>,
    output: String,
  },

  #[error(transparent)]
  Execute(#[from] ExecuteError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtoOutcome {
  Success,
  Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtoState {
  Pending,
  CommandsComputed,
  Executed(ProtoOutcome),
}

#[derive(Debug, Clone)]
pub struct ProtoCodegenUnit {
  env: Arc<Environment>,
  protos: Vec<PathBuf>,
  includes: Vec<PathBuf>,
  proto_flags: Vec<String>,
  commands: Vec<CommandChain>,
  state: ProtoState,
}

impl ProtoCodegenUnit {
  /// Declare a unit for `protos`, a whitespace-separated list of proto files
  /// relative to the module's broc directory.
  pub fn new(
    env: Arc<Environment>,
    protos: &str,
    includes: Vec<String>,
    proto_flags: Vec<String>,
  ) -> Result<Self, ProtoError> {
    let protos: Vec<PathBuf> = protos.split_whitespace().map(|p| normalize(Path::new(p))).collect();
    if protos.is_empty() {
      return Err(ProtoError::NoProtoFiles);
    }

    let mut unit = Self {
      env,
      protos,
      includes: Vec::new(),
      proto_flags,
      commands: Vec::new(),
      state: ProtoState::Pending,
    };
    for include in includes {
      unit.add_include(Path::new(&include));
    }
    Ok(unit)
  }

  pub fn protos(&self) -> &[PathBuf] {
    &self.protos
  }

  pub fn includes(&self) -> &[PathBuf] {
    &self.includes
  }

  pub fn state(&self) -> ProtoState {
    self.state
  }

  pub fn commands(&self) -> &[CommandChain] {
    &self.commands
  }

  fn add_include(&mut self, dir: &Path) {
    let dir = normalize(dir);
    if !self.includes.contains(&dir) {
      self.includes.push(dir);
    }
  }

  /// Compute one `protoc` command per proto file.
  pub fn compute_commands(&mut self) -> Result<&[CommandChain], ProtoError> {
    if let ProtoState::Executed(_) = self.state {
      return Err(ProtoError::AlreadyExecuted);
    }

    let broc_dir = self.env.broc_dir().to_path_buf();
    self.add_include(&broc_dir);

    let mut commands = Vec::with_capacity(self.protos.len());
    for proto in &self.protos {
      let command = self.proto_command(proto);
      if !commands.contains(&command) {
        commands.push(command);
      }
    }

    self.commands = commands;
    self.state = ProtoState::CommandsComputed;
    Ok(&self.commands)
  }

  /// `mkdir -p <out> && protoc --cpp_out=<cpp_out> <flags...> -I=<dir>... -I=. <broc_dir>/<proto>`
  ///
  /// `cpp_out` is anchored at the first segment of `proto` when it has a
  /// directory, not at its full directory. protoc writes generated files
  /// under `cpp_out` at the proto's path relative to the matching `-I`
  /// root, and the generated sources are expected at that location.
  fn proto_command(&self, proto: &Path) -> CommandChain {
    let root = self.env.output_root().join(self.env.broc_dir());
    let out = normalize(&root.join(proto.parent().unwrap_or(Path::new(""))));
    let cpp_out = match first_segment(proto) {
      Some(segment) => normalize(&root.join(segment)),
      None => normalize(&root),
    };

    let mut protoc = CommandLine::new(self.env.protoc().to_string_lossy())
      .arg(format!("--cpp_out={}", cpp_out.display()))
      .args(self.proto_flags.iter().cloned());
    for include in &self.includes {
      protoc = protoc.arg(format!("-I={}", include.display()));
    }
    let protoc = protoc.arg("-I=.").path(&self.env.broc_dir().join(proto));

    CommandChain::new().then(mkdir_p(&out)).then(protoc)
  }

  /// Run every computed command, stopping at the first failure.
  pub fn execute(&mut self, executor: &dyn CommandExecutor) -> Result<(), ProtoError> {
    match self.state {
      ProtoState::Pending => return Err(ProtoError::NotComputed),
      ProtoState::Executed(_) => return Err(ProtoError::AlreadyExecuted),
      ProtoState::CommandsComputed => {}
    }

    for command in &self.commands {
      let cmd = command.to_string();
      info!("{}", cmd);

      let output = match executor.run(&cmd, true) {
        Ok(output) => output,
        Err(err) => {
          self.state = ProtoState::Executed(ProtoOutcome::Failed);
          return Err(err.into());
        }
      };
      if !output.success() {
        error!(cmd = %cmd, code = ?output.code, "protoc failed");
        self.state = ProtoState::Executed(ProtoOutcome::Failed);
        return Err(ProtoError::CommandFailed {
          cmd,
          code: output.code,
          output: output.output,
        });
      }
    }

    self.state = ProtoState::Executed(ProtoOutcome::Success);
    Ok(())
  }

  /// Compute and run the unit's commands.
  pub fn pre_action(&mut self, executor: &dyn CommandExecutor) -> Result<(), ProtoError> {
    self.compute_commands()?;
    self.execute(executor)
  }
}

impl fmt::Display for ProtoCodegenUnit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for command in &self.commands {
      writeln!(f, "{}", command)?;
    }
    Ok(())
  }
}
