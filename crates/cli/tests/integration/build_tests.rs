//! Build command integration tests.
//!
//! Builds run against a stand-in toolchain so no compiler is required.

#![cfg(unix)]

use predicates::prelude::*;

use super::common::TestEnv;

fn calc_env() -> TestEnv {
  let env = TestEnv::from_fixture("calc.json");
  let tool = env.fake_tool();
  env.set_toolchain(&tool);
  env.write_file("app/calc/lib/libbase.a", "!<arch>\n");
  env
}

#[test]
fn build_runs_every_unit() {
  let env = calc_env();

  env
    .broc_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Build complete"))
    .stdout(predicate::str::contains("Proto libraries generated: 1"))
    .stdout(predicate::str::contains("Libraries copied: 1"))
    .stdout(predicate::str::contains("Targets built: 3"));

  assert!(env.exists("broc_out/app/calc/output/lib/libbase.a"));
  assert!(env.exists("broc_out/app/calc/objs/calc/main.o"));
  assert!(env.exists("broc_out/app/calc/objs/calc/idl/calc.pb.o"));
  assert!(env.exists("broc_out/app/calc/output/bin/calc"));
  assert!(env.exists("broc_out/app/calc/output/test/calc_test"));
}

#[test]
fn build_with_tests_runs_unit_tests() {
  let env = calc_env();

  env
    .broc_cmd()
    .args(["build", "--test"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Tests passed: 1"));
}

#[test]
fn build_logs_precopy() {
  let env = calc_env();

  env
    .broc_cmd()
    .arg("build")
    .assert()
    .success()
    .stderr(predicate::str::contains("[PreCopy] mkdir -p broc_out/app/calc/output/lib && cp -Rp"));
}

#[test]
fn missing_prebuilt_library_fails_build() {
  let env = TestEnv::from_fixture("calc.json");
  let tool = env.fake_tool();
  env.set_toolchain(&tool);

  env
    .broc_cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Build failed"))
    .stdout(predicate::str::contains("Targets built: 0"));

  assert!(!env.exists("broc_out/app/calc/output/bin/calc"));
}

#[test]
fn failing_compiler_stops_build() {
  let env = TestEnv::from_fixture("hello.json");
  env.set_toolchain(std::path::Path::new("false"));

  env
    .broc_cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("hello"))
    .stdout(predicate::str::contains("Targets built: 0"));
}

#[test]
fn workspace_flag_overrides_manifest_location() {
  let env = TestEnv::from_fixture("hello.json");
  let tool = env.fake_tool();
  env.set_toolchain(&tool);
  let other = tempfile::TempDir::new().unwrap();

  env
    .broc_cmd()
    .arg("--workspace")
    .arg(other.path())
    .arg("build")
    .assert()
    .success();

  assert!(other.path().join("broc_out/app/hello/output/bin/hello").exists());
  assert!(!env.exists("broc_out"));
}
