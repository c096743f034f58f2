mod build;
mod info;
mod plan;

pub use build::cmd_build;
pub use info::cmd_info;
pub use plan::cmd_plan;

use std::path::Path;

use anyhow::{Context, Result};

use broc_lib::execute::BuildSet;
use broc_lib::manifest::Manifest;

/// Load a manifest and instantiate its units.
///
/// The workspace is `workspace` when given, else the manifest's own setting,
/// else the directory holding the manifest.
fn load_build_set(path: &Path, workspace: Option<&Path>) -> Result<BuildSet> {
  let mut manifest =
    Manifest::load(path).with_context(|| format!("Failed to load manifest: {}", path.display()))?;

  if let Some(dir) = workspace {
    manifest.environment.workspace = Some(dir.to_path_buf());
  } else if manifest.environment.workspace.is_none() {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    manifest.environment.workspace = Some(parent.to_path_buf());
  }

  manifest
    .instantiate()
    .with_context(|| format!("Invalid manifest: {}", path.display()))
}
