use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Language of a source file, as far as compiler selection is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageKind {
  C,
  Cxx,
  /// Anything else the compiler driver accepts (assembly, for instance).
  Other,
}

impl LanguageKind {
  pub fn from_path(path: &Path) -> Self {
    match path.extension().and_then(|e| e.to_str()) {
      Some("c") => LanguageKind::C,
      Some("cc" | "cpp" | "cxx" | "c++" | "C") => LanguageKind::Cxx,
      _ => LanguageKind::Other,
    }
  }

  pub fn is_cxx(self) -> bool {
    matches!(self, LanguageKind::Cxx)
  }
}

/// Identity of a target within a build: its module and its name.
///
/// Sources use this to refer to their owner without holding it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetKey {
  pub module_path: PathBuf,
  pub name: String,
}

impl TargetKey {
  pub fn new(module_path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
    Self {
      module_path: module_path.into(),
      name: name.into(),
    }
  }
}

impl fmt::Display for TargetKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.module_path.display(), self.name)
  }
}
