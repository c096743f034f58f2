//! Final link and archive commands.
//!
//! A [`Builder`] is constructed once a target has finished planning and
//! renders the single command that produces the target's artifact. It holds
//! only its constructor inputs and never runs anything, so rendering is
//! idempotent.
//!
//! Objects and archives are kept in sorted sets: the same inputs always give
//! byte-identical commands.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::command::CommandLine;

/// Links objects and archives into an executable.
///
/// `<compiler> -o <output> <objects...> <link options...> <archives...>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkBuilder {
  pub output: PathBuf,
  pub objects: BTreeSet<PathBuf>,
  pub libs: BTreeSet<PathBuf>,
  pub link_options: Vec<String>,
  pub compiler: PathBuf,
  pub workspace: PathBuf,
}

impl LinkBuilder {
  pub fn command_line(&self) -> CommandLine {
    CommandLine::new(self.compiler.to_string_lossy())
      .arg("-o")
      .path(&self.output)
      .paths(self.objects.iter().map(PathBuf::as_path))
      .args(self.link_options.iter().cloned())
      .paths(self.libs.iter().map(PathBuf::as_path))
  }
}

/// Packs objects into a static archive.
///
/// `<tool> rcs <output> <objects...>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveBuilder {
  pub output: PathBuf,
  pub objects: BTreeSet<PathBuf>,
  /// Archives the library depends on. They are not merged into the output.
  pub libs: BTreeSet<PathBuf>,
  pub tool: PathBuf,
  pub workspace: PathBuf,
}

impl ArchiveBuilder {
  pub fn command_line(&self) -> CommandLine {
    CommandLine::new(self.tool.to_string_lossy())
      .arg("rcs")
      .path(&self.output)
      .paths(self.objects.iter().map(PathBuf::as_path))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Builder {
  Link(LinkBuilder),
  Archive(ArchiveBuilder),
}

impl Builder {
  pub fn command_line(&self) -> CommandLine {
    match self {
      Builder::Link(link) => link.command_line(),
      Builder::Archive(archive) => archive.command_line(),
    }
  }

  /// The rendered command.
  pub fn build_command(&self) -> String {
    self.command_line().to_string()
  }

  pub fn output(&self) -> &Path {
    match self {
      Builder::Link(link) => &link.output,
      Builder::Archive(archive) => &archive.output,
    }
  }

  /// Directory the command must be run from.
  pub fn workspace(&self) -> &Path {
    match self {
      Builder::Link(link) => &link.workspace,
      Builder::Archive(archive) => &archive.workspace,
    }
  }
}
