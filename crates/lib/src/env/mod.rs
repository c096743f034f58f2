//! Module build environment.
//!
//! An [`Environment`] describes one module of the workspace: where it lives,
//! which toolchain builds it and which global flags apply to its targets.
//! Targets and proto units only ever read it, so a single instance is shared
//! behind an [`Arc`] by everything declared in the module.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_AR, DEFAULT_CC, DEFAULT_CXX, DEFAULT_OUTPUT_ROOT, DEFAULT_PROTOC};

/// Environment variables that override the configured toolchain.
pub const ENV_CC: &str = "BROC_CC";
pub const ENV_CXX: &str = "BROC_CXX";
pub const ENV_AR: &str = "BROC_AR";
pub const ENV_PROTOC: &str = "BROC_PROTOC";

/// Declared environment settings, as read from a manifest.
///
/// Every field is optional; [`Environment::from_config`] fills in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
  pub module_path: String,
  pub workspace: Option<PathBuf>,
  pub broc_dir: Option<String>,
  pub output_root: Option<PathBuf>,
  pub cc: Option<String>,
  pub cxx: Option<String>,
  pub ar: Option<String>,
  pub protoc: Option<String>,
  pub ldflags: Vec<String>,
  pub cppflags: Vec<String>,
  pub cflags: Vec<String>,
  pub cxxflags: Vec<String>,
  pub includes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
  module_path: PathBuf,
  workspace: PathBuf,
  broc_dir: PathBuf,
  output_root: PathBuf,
  cc: PathBuf,
  cxx: PathBuf,
  ar: PathBuf,
  protoc: PathBuf,
  ldflags: Vec<String>,
  cppflags: Vec<String>,
  cflags: Vec<String>,
  cxxflags: Vec<String>,
  includes: Vec<PathBuf>,
}

impl Environment {
  /// Environment with default toolchain and no flags.
  pub fn new(module_path: impl Into<PathBuf>, workspace: impl Into<PathBuf>) -> Self {
    let module_path = crate::util::path::normalize(&module_path.into());
    Self {
      broc_dir: module_path.clone(),
      module_path,
      workspace: workspace.into(),
      output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
      cc: PathBuf::from(DEFAULT_CC),
      cxx: PathBuf::from(DEFAULT_CXX),
      ar: PathBuf::from(DEFAULT_AR),
      protoc: PathBuf::from(DEFAULT_PROTOC),
      ldflags: Vec::new(),
      cppflags: Vec::new(),
      cflags: Vec::new(),
      cxxflags: Vec::new(),
      includes: Vec::new(),
    }
  }

  /// Build an environment from declared settings.
  ///
  /// Toolchain entries may be overridden by `BROC_CC`, `BROC_CXX`, `BROC_AR`
  /// and `BROC_PROTOC`.
  pub fn from_config(config: &EnvConfig) -> Self {
    let workspace = config.workspace.clone().unwrap_or_else(|| PathBuf::from("."));
    let mut env = Self::new(&config.module_path, workspace);

    if let Some(ref dir) = config.broc_dir {
      env.broc_dir = crate::util::path::normalize(Path::new(dir));
    }
    if let Some(ref root) = config.output_root {
      env.output_root = root.clone();
    }

    env.cc = tool(ENV_CC, config.cc.as_deref(), DEFAULT_CC);
    env.cxx = tool(ENV_CXX, config.cxx.as_deref(), DEFAULT_CXX);
    env.ar = tool(ENV_AR, config.ar.as_deref(), DEFAULT_AR);
    env.protoc = tool(ENV_PROTOC, config.protoc.as_deref(), DEFAULT_PROTOC);

    env.ldflags = config.ldflags.clone();
    env.cppflags = config.cppflags.clone();
    env.cflags = config.cflags.clone();
    env.cxxflags = config.cxxflags.clone();
    env.includes = config.includes.iter().map(PathBuf::from).collect();

    debug!(module = %env.module_path.display(), cc = %env.cc.display(), cxx = %env.cxx.display(), "environment ready");
    env
  }

  pub fn with_ldflags<I, S>(mut self, flags: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.ldflags = flags.into_iter().map(Into::into).collect();
    self
  }

  pub fn into_shared(self) -> Arc<Self> {
    Arc::new(self)
  }

  /// Location of the module relative to the workspace root.
  pub fn module_path(&self) -> &Path {
    &self.module_path
  }

  pub fn workspace(&self) -> &Path {
    &self.workspace
  }

  /// Directory holding the module's build description, used as the root for
  /// proto sources and their generated code.
  pub fn broc_dir(&self) -> &Path {
    &self.broc_dir
  }

  pub fn output_root(&self) -> &Path {
    &self.output_root
  }

  /// `<output_root>/<module_path>`
  pub fn module_output_dir(&self) -> PathBuf {
    self.output_root.join(&self.module_path)
  }

  pub fn cc(&self) -> &Path {
    &self.cc
  }

  pub fn cxx(&self) -> &Path {
    &self.cxx
  }

  pub fn ar(&self) -> &Path {
    &self.ar
  }

  pub fn protoc(&self) -> &Path {
    &self.protoc
  }

  /// Global link flags applied to executables that declare none.
  pub fn ldflags(&self) -> &[String] {
    &self.ldflags
  }

  pub fn cppflags(&self) -> &[String] {
    &self.cppflags
  }

  pub fn cflags(&self) -> &[String] {
    &self.cflags
  }

  pub fn cxxflags(&self) -> &[String] {
    &self.cxxflags
  }

  pub fn includes(&self) -> &[PathBuf] {
    &self.includes
  }
}

fn tool(var: &str, configured: Option<&str>, default: &str) -> PathBuf {
  if let Ok(value) = std::env::var(var)
    && !value.is_empty()
  {
    return PathBuf::from(value);
  }
  PathBuf::from(configured.unwrap_or(default))
}
