//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated test workspace.
///
/// Each test gets its own temporary directory holding a `BROC.json` manifest;
/// builds run with that directory as the workspace.
pub struct TestEnv {
  pub temp: TempDir,
  pub manifest_path: PathBuf,
}

impl TestEnv {
  /// Create from a fixture file.
  pub fn from_fixture(name: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let manifest_path = temp.path().join("BROC.json");
    std::fs::write(&manifest_path, fixture_content(name)).unwrap();
    Self { temp, manifest_path }
  }

  /// Workspace root, canonicalized.
  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap_or_else(|_| self.temp.path().to_path_buf())
  }

  /// Write a file relative to the workspace.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn exists(&self, relative_path: &str) -> bool {
    self.temp.path().join(relative_path).exists()
  }

  /// Point every tool of the manifest at `tool`.
  pub fn set_toolchain(&self, tool: &Path) {
    let mut manifest: Value = serde_json::from_str(&std::fs::read_to_string(&self.manifest_path).unwrap()).unwrap();
    let tool = Value::String(tool.display().to_string());
    for key in ["cc", "cxx", "ar", "protoc"] {
      manifest["environment"][key] = tool.clone();
    }
    std::fs::write(&self.manifest_path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();
  }

  /// Install a stand-in compiler that writes an executable to its `-o`
  /// argument and returns it.
  #[cfg(unix)]
  pub fn fake_tool(&self) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = self.root().join("fake-tool");
    std::fs::write(
      &path,
      r#"#!/bin/sh
out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then out="$2"; shift; fi
  shift
done
if [ -n "$out" ]; then
  printf '#!/bin/sh\nexit 0\n' > "$out"
  chmod +x "$out"
fi
"#,
    )
    .unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  /// Get a pre-configured Command for the broc binary.
  ///
  /// Toolchain overrides from the calling environment are cleared so the
  /// manifest's settings apply.
  pub fn broc_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("broc");
    cmd.current_dir(self.temp.path());
    for var in ["BROC_CC", "BROC_CXX", "BROC_AR", "BROC_PROTOC", "RUST_LOG"] {
      cmd.env_remove(var);
    }
    cmd
  }
}
