//! Build manifests.
//!
//! [`Manifest::instantiate`] turns the declarations of one module into a
//! [`BuildSet`] ready for planning. Declaration order is kept: targets are
//! planned and built in the order they appear.

mod types;

pub use types::*;

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::env::Environment;
use crate::execute::BuildSet;
use crate::proto::ProtoCodegenUnit;
use crate::source::SourceUnit;
use crate::target::Target;

impl Manifest {
  /// Read and parse a manifest file.
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json(&content)
  }

  pub fn from_json(content: &str) -> Result<Self, ManifestError> {
    Ok(serde_json::from_str(content)?)
  }

  /// Create every declared unit against one shared environment.
  pub fn instantiate(&self) -> Result<BuildSet, ManifestError> {
    let env = Environment::from_config(&self.environment).into_shared();
    let mut set = BuildSet::new(env.clone());
    let mut seen = HashSet::new();

    for unit in &self.units {
      if let Some(name) = unit.name()
        && !seen.insert(name)
      {
        return Err(ManifestError::DuplicateTarget(name.to_string()));
      }

      match unit {
        UnitDecl::Application {
          name,
          sources,
          link_options,
          libs,
        } => set.targets.push(Target::application(
          name,
          env.clone(),
          source_units(sources),
          link_options.clone(),
          libs.clone(),
        )?),
        UnitDecl::UtApplication {
          name,
          sources,
          link_options,
          libs,
          ut_args,
        } => set.targets.push(Target::ut_application(
          name,
          env.clone(),
          source_units(sources),
          link_options.clone(),
          libs.clone(),
          ut_args.clone(),
        )?),
        UnitDecl::StaticLibrary { name, sources, libs } => {
          set
            .targets
            .push(Target::static_library(name, env.clone(), source_units(sources), libs.clone())?)
        }
        UnitDecl::ProtoLibrary {
          protos,
          includes,
          proto_flags,
        } => set.protos.push(ProtoCodegenUnit::new(
          env.clone(),
          protos,
          includes.clone(),
          proto_flags.clone(),
        )?),
      }
    }

    debug!(
      module = %env.module_path().display(),
      targets = set.targets.len(),
      protos = set.protos.len(),
      "manifest instantiated"
    );
    Ok(set)
  }
}

fn source_units(sources: &[String]) -> Vec<SourceUnit> {
  sources.iter().map(SourceUnit::new).collect()
}
