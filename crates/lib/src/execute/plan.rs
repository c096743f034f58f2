//! Planning every unit of a module.
//!
//! A [`BuildSet`] owns the targets and proto units instantiated from one
//! manifest. [`BuildSet::plan`] computes every command without running any
//! of them and summarizes the result in a serializable [`PlanSummary`].

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::env::Environment;
use crate::proto::{ProtoCodegenUnit, ProtoError, ProtoState};
use crate::source::TargetKey;
use crate::target::{Target, TargetKind};
use crate::util::hash::Hashable;

#[derive(Debug, Clone)]
pub struct BuildSet {
  pub env: Arc<Environment>,
  pub protos: Vec<ProtoCodegenUnit>,
  pub targets: Vec<Target>,
}

impl BuildSet {
  pub fn new(env: Arc<Environment>) -> Self {
    Self {
      env,
      protos: Vec::new(),
      targets: Vec::new(),
    }
  }

  /// Look a target up by the key its sources were bound with.
  pub fn target(&self, key: &TargetKey) -> Option<&Target> {
    self.targets.iter().find(|t| &t.key() == key)
  }

  /// Compute proto commands and plan every target that is compiled.
  ///
  /// Source-less static libraries are left alone: they are copied, not built.
  pub fn plan(&mut self) -> Result<PlanSummary, ProtoError> {
    for unit in &mut self.protos {
      if unit.state() == ProtoState::Pending {
        unit.compute_commands()?;
      }
    }
    for target in &mut self.targets {
      if !is_prebuilt(target) && target.builder().is_none() {
        target.action();
      }
    }
    Ok(self.summary())
  }

  /// Snapshot of the commands planned so far.
  pub fn summary(&self) -> PlanSummary {
    PlanSummary {
      module: self.env.module_path().to_path_buf(),
      protos: self
        .protos
        .iter()
        .map(|unit| ProtoPlan {
          protos: unit.protos().to_vec(),
          commands: unit.commands().iter().map(ToString::to_string).collect(),
        })
        .collect(),
      targets: self.targets.iter().map(TargetPlan::from).collect(),
    }
  }
}

/// A static library without sources, provided as a pre-built archive.
pub fn is_prebuilt(target: &Target) -> bool {
  matches!(target.kind(), TargetKind::StaticLibrary) && target.sources().is_empty()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
  pub module: PathBuf,
  pub protos: Vec<ProtoPlan>,
  pub targets: Vec<TargetPlan>,
}

impl Hashable for PlanSummary {}

impl PlanSummary {
  /// Number of commands a build would run, tests excluded.
  pub fn command_count(&self) -> usize {
    let protos: usize = self.protos.iter().map(|p| p.commands.len()).sum();
    let targets: usize = self
      .targets
      .iter()
      .map(|t| t.compile_commands.len() + usize::from(t.build_command.is_some()) + usize::from(t.precopy_command.is_some()))
      .sum();
    protos + targets
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtoPlan {
  pub protos: Vec<PathBuf>,
  pub commands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPlan {
  pub kind: String,
  pub name: String,
  pub output: PathBuf,
  pub compiler: PathBuf,
  pub objects: Vec<PathBuf>,
  pub compile_commands: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub build_command: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub precopy_command: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub test_command: Option<String>,
}

impl From<&Target> for TargetPlan {
  fn from(target: &Target) -> Self {
    Self {
      kind: target.kind_name().to_string(),
      name: target.name().to_string(),
      output: target.output_file().to_path_buf(),
      compiler: target.compiler().to_path_buf(),
      objects: target.objects().map(|o| o.iter().cloned().collect()).unwrap_or_default(),
      compile_commands: target.compile_commands().iter().map(ToString::to_string).collect(),
      build_command: target.build_command(),
      precopy_command: is_prebuilt(target).then(|| target.precopy_command().to_string()),
      test_command: target.test_invocation().map(str::to_string),
    }
  }
}
