//! Structured shell commands.
//!
//! Every action this crate plans is ultimately handed to a shell as a single
//! string. Commands are assembled here as a program plus an argument list and
//! only joined into text at the boundary, so ordering and quoting can be
//! checked without parsing strings back apart.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A single program invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandLine {
  pub program: String,
  pub args: Vec<String>,
}

impl CommandLine {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  /// Append a path argument, rendered lossily.
  pub fn path(self, path: &Path) -> Self {
    self.arg(path.to_string_lossy().into_owned())
  }

  pub fn paths<'a, I>(mut self, paths: I) -> Self
  where
    I: IntoIterator<Item = &'a Path>,
  {
    self
      .args
      .extend(paths.into_iter().map(|p| p.to_string_lossy().into_owned()));
    self
  }
}

impl fmt::Display for CommandLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", quote(&self.program))?;
    for arg in &self.args {
      write!(f, " {}", quote(arg))?;
    }
    Ok(())
  }
}

/// Steps that run one after another, each only if the previous succeeded.
///
/// Rendered as `step1 && step2 && ...`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandChain {
  pub steps: Vec<CommandLine>,
}

impl CommandChain {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn then(mut self, step: CommandLine) -> Self {
    self.steps.push(step);
    self
  }
}

impl fmt::Display for CommandChain {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, step) in self.steps.iter().enumerate() {
      if i > 0 {
        f.write_str(" && ")?;
      }
      write!(f, "{}", step)?;
    }
    Ok(())
  }
}

/// `mkdir -p <dir>`
pub fn mkdir_p(dir: &Path) -> CommandLine {
  CommandLine::new("mkdir").arg("-p").path(dir)
}

/// Quote a word for a POSIX shell.
///
/// Words made only of characters the shell treats literally are returned
/// unchanged so the common case stays readable.
pub fn quote(word: &str) -> String {
  if !word.is_empty() && word.chars().all(is_shell_safe) {
    return word.to_string();
  }
  format!("'{}'", word.replace('\'', r"'\''"))
}

fn is_shell_safe(c: char) -> bool {
  c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '=' | ':' | ',' | '+' | '@' | '%')
}
