use std::path::PathBuf;

use thiserror::Error;

use crate::execute::ExecuteError;

/// Variant-specific state of a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
  /// An executable under `output/bin`.
  Application { link_options: Vec<String> },
  /// A unit-test executable under `output/test`, plus the command that runs it.
  UtApplication {
    link_options: Vec<String>,
    ut_args: Vec<String>,
    ut_cmd: Option<String>,
  },
  /// A `lib<name>.a` archive under `output/lib`.
  StaticLibrary,
}

impl TargetKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      TargetKind::Application { .. } => "application",
      TargetKind::UtApplication { .. } => "ut_application",
      TargetKind::StaticLibrary => "static_library",
    }
  }

  /// Directory under `<module>/output` that receives the artifact.
  pub fn output_subdir(&self) -> &'static str {
    match self {
      TargetKind::Application { .. } => "bin",
      TargetKind::UtApplication { .. } => "test",
      TargetKind::StaticLibrary => "lib",
    }
  }

  pub fn link_options(&self) -> Option<&[String]> {
    match self {
      TargetKind::Application { link_options } | TargetKind::UtApplication { link_options, .. } => Some(link_options),
      TargetKind::StaticLibrary => None,
    }
  }
}

/// Errors raised while declaring or preparing a target.
#[derive(Debug, Error)]
pub enum TargetError {
  #[error("target name must not be empty")]
  EmptyName,

  #[error("{kind}({name}) declares no sources")]
  NoSources { kind: &'static str, name: String },

  #[error("{name}: source {} must be relative to the module directory", input.display())]
  AbsoluteSource { name: String, input: PathBuf },

  #[error("{name}: sources {} and {} compile to the same object file", first.display(), second.display())]
  ObjectCollision { name: String, first: PathBuf, second: PathBuf },

  #[error("StaticLibrary({name}) can not copy because its source is not empty")]
  CopyWithSources { name: String },

  #[error("{name} is not a static library")]
  NotALibrary { name: String },

  #[error("precopy of {name} failed: {source}")]
  CopyFailed {
    name: String,
    #[source]
    source: ExecuteError,
  },
}
