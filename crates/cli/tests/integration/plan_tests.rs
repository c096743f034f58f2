//! Plan command integration tests.

use predicates::prelude::*;
use serde_json::Value;

use super::common::TestEnv;

#[test]
fn plan_prints_compile_and_link_commands() {
  let env = TestEnv::from_fixture("hello.json");

  env
    .broc_cmd()
    .arg("plan")
    .arg(&env.manifest_path)
    .assert()
    .success()
    .stdout(predicate::str::contains(
      "gcc -c -O2 -o broc_out/app/hello/objs/hello/main.o app/hello/main.c",
    ))
    .stdout(predicate::str::contains(
      "gcc -o broc_out/app/hello/output/bin/hello broc_out/app/hello/objs/hello/main.o broc_out/app/hello/objs/hello/util.o",
    ))
    .stdout(predicate::str::contains("Commands: 3"));
}

#[test]
fn plan_uses_default_manifest_path() {
  let env = TestEnv::from_fixture("hello.json");

  env
    .broc_cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("app/hello"));
}

#[test]
fn plan_executes_nothing() {
  let env = TestEnv::from_fixture("calc.json");

  env.broc_cmd().arg("plan").assert().success();

  assert!(!env.exists("broc_out"));
}

#[test]
fn plan_json_lists_every_unit() {
  let env = TestEnv::from_fixture("calc.json");

  let output = env
    .broc_cmd()
    .args(["plan", "--output", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let plan: Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(plan["module"], "app/calc");
  assert_eq!(plan["fingerprint"].as_str().unwrap().len(), 20);
  assert_eq!(plan["protos"].as_array().unwrap().len(), 1);

  let targets = plan["targets"].as_array().unwrap();
  assert_eq!(targets.len(), 4);
  assert_eq!(targets[0]["kind"], "static_library");
  assert!(targets[0]["precopy_command"].as_str().unwrap().contains("cp -Rp app/calc/lib/libbase.a"));
  assert_eq!(targets[1]["build_command"], "ar rcs broc_out/app/calc/output/lib/libcalc_core.a broc_out/app/calc/objs/calc_core/core.o");
  assert_eq!(targets[2]["compiler"], "g++");
  assert_eq!(
    targets[3]["test_command"],
    "broc_out/app/calc/output/test/calc_test --gtest_brief=1"
  );
}

#[test]
fn plan_fingerprint_is_stable() {
  let env = TestEnv::from_fixture("calc.json");

  let run = || {
    let output = env.broc_cmd().args(["plan", "-o", "json"]).output().unwrap();
    let plan: Value = serde_json::from_slice(&output.stdout).unwrap();
    plan["fingerprint"].as_str().unwrap().to_string()
  };

  assert_eq!(run(), run());
}

#[test]
fn plan_rejects_executable_without_sources() {
  let env = TestEnv::from_fixture("no_sources.json");

  env
    .broc_cmd()
    .arg("plan")
    .assert()
    .failure()
    .stderr(predicate::str::contains("application(broken)"));
}

#[test]
fn plan_rejects_duplicate_targets() {
  let env = TestEnv::from_fixture("duplicate.json");

  env
    .broc_cmd()
    .arg("plan")
    .assert()
    .failure()
    .stderr(predicate::str::contains("declared more than once"));
}
