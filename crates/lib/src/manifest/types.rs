//! Declarations read from a build manifest.
//!
//! A manifest is a JSON document describing one module:
//!
//! ```json
//! {
//!   "environment": { "module_path": "app/calc", "ldflags": ["-lpthread"] },
//!   "units": [
//!     { "kind": "proto_library", "protos": "idl/calc.proto" },
//!     { "kind": "static_library", "name": "base" },
//!     { "kind": "application", "name": "calc", "sources": ["main.cpp"], "libs": ["libbase.a"] }
//!   ]
//! }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::env::EnvConfig;
use crate::proto::ProtoError;
use crate::target::TargetError;
use crate::util::hash::Hashable;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
  #[serde(default)]
  pub environment: EnvConfig,
  #[serde(default)]
  pub units: Vec<UnitDecl>,
}

impl Hashable for Manifest {}

/// One declared unit, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitDecl {
  Application {
    name: String,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    link_options: Vec<String>,
    #[serde(default)]
    libs: Vec<PathBuf>,
  },
  UtApplication {
    name: String,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    link_options: Vec<String>,
    #[serde(default)]
    libs: Vec<PathBuf>,
    #[serde(default)]
    ut_args: Vec<String>,
  },
  StaticLibrary {
    name: String,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    libs: Vec<PathBuf>,
  },
  ProtoLibrary {
    /// Whitespace-separated proto files, relative to the broc directory.
    protos: String,
    #[serde(default)]
    includes: Vec<String>,
    #[serde(default)]
    proto_flags: Vec<String>,
  },
}

impl UnitDecl {
  /// Declared target name, `None` for proto libraries.
  pub fn name(&self) -> Option<&str> {
    match self {
      Self::Application { name, .. } | Self::UtApplication { name, .. } | Self::StaticLibrary { name, .. } => {
        Some(name)
      }
      Self::ProtoLibrary { .. } => None,
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
  #[error("failed to read manifest {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid manifest: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("invalid target declaration: {0}")]
  Target(#[from] TargetError),

  #[error("invalid proto library declaration: {0}")]
  Proto(#[from] ProtoError),

  #[error("target {0} is declared more than once")]
  DuplicateTarget(String),
}
