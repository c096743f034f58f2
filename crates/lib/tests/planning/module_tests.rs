//! A whole module planned from a manifest and run through an executor.

use std::cell::RefCell;
use std::path::PathBuf;

use broc_lib::execute::{CommandExecutor, CommandOutput, ExecuteError, RunOptions, ShellExecutor, run_build};
use broc_lib::manifest::Manifest;
use broc_lib::util::hash::Hashable;

const MODULE: &str = r#"{
  "environment": { "module_path": "m/calc", "ldflags": ["-lm", "-lpthread"] },
  "units": [
    { "kind": "proto_library", "protos": "a/b/util.proto util.proto" },
    { "kind": "application", "name": "calc", "sources": ["b.cpp", "a.c"], "libs": ["libx.a"] },
    { "kind": "static_library", "name": "svc.a", "sources": ["svc.c"] }
  ]
}"#;

#[derive(Default)]
struct Recorder {
  commands: RefCell<Vec<String>>,
}

impl CommandExecutor for Recorder {
  fn run(&self, cmd: &str, _verbose: bool) -> Result<CommandOutput, ExecuteError> {
    self.commands.borrow_mut().push(cmd.to_string());
    Ok(CommandOutput::ok(""))
  }
}

#[test]
fn calc_module_plan() {
  let mut set = Manifest::from_json(MODULE).unwrap().instantiate().unwrap();
  let summary = set.plan().unwrap();

  let calc = &summary.targets[0];
  assert_eq!(calc.compiler, PathBuf::from("g++"));
  assert_eq!(calc.output, PathBuf::from("broc_out/m/calc/output/bin/calc"));
  assert_eq!(
    calc.objects,
    vec![
      PathBuf::from("broc_out/m/calc/objs/calc/a.o"),
      PathBuf::from("broc_out/m/calc/objs/calc/b.o"),
    ]
  );
  assert_eq!(
    calc.build_command.as_deref(),
    Some(
      "g++ -o broc_out/m/calc/output/bin/calc broc_out/m/calc/objs/calc/a.o broc_out/m/calc/objs/calc/b.o -lm -lpthread libx.a"
    )
  );

  let svc = &summary.targets[1];
  assert_eq!(svc.output, PathBuf::from("broc_out/m/calc/output/lib/libsvc.a"));
  assert_eq!(svc.compiler, PathBuf::from("gcc"));
}

#[test]
fn proto_outputs_are_anchored() {
  let mut set = Manifest::from_json(MODULE).unwrap().instantiate().unwrap();
  let summary = set.plan().unwrap();

  let commands = &summary.protos[0].commands;
  assert_eq!(commands.len(), 2);
  assert!(commands[0].contains("--cpp_out=broc_out/m/calc/a "));
  assert!(commands[0].starts_with("mkdir -p broc_out/m/calc/a/b && protoc"));
  assert!(commands[1].contains("--cpp_out=broc_out/m/calc "));
}

#[test]
fn identical_manifests_share_a_fingerprint() {
  let plan = || {
    let mut set = Manifest::from_json(MODULE).unwrap().instantiate().unwrap();
    set.plan().unwrap().compute_hash().unwrap()
  };
  assert_eq!(plan(), plan());
}

#[test]
fn run_follows_plan_order() {
  let mut set = Manifest::from_json(MODULE).unwrap().instantiate().unwrap();
  let summary = set.plan().unwrap();
  let recorder = Recorder::default();

  let report = run_build(&mut set, &recorder, RunOptions::default());

  assert!(report.is_success());
  let commands = recorder.commands.into_inner();
  assert_eq!(commands.len(), summary.command_count());
  assert!(commands[0].contains("protoc"));
  assert!(commands[1].contains("protoc"));
  assert!(commands.last().unwrap().contains("ar rcs broc_out/m/calc/output/lib/libsvc.a"));
}

#[test]
#[cfg(unix)]
fn shell_run_creates_output_tree() {
  let temp = tempfile::TempDir::new().unwrap();
  let json = MODULE.replace(
    r#""module_path": "m/calc","#,
    r#""module_path": "m/calc", "cc": "true", "cxx": "true", "ar": "true", "protoc": "true","#,
  );
  let mut set = temp_env::with_vars_unset(["BROC_CC", "BROC_CXX", "BROC_AR", "BROC_PROTOC"], || {
    Manifest::from_json(&json).unwrap().instantiate().unwrap()
  });

  let report = run_build(&mut set, &ShellExecutor::new(temp.path()), RunOptions::default());

  assert!(report.is_success(), "{:?}", report.failed);
  assert_eq!(report.targets_built, 2);
  assert!(temp.path().join("broc_out/m/calc/objs/calc").is_dir());
  assert!(temp.path().join("broc_out/m/calc/output/bin").is_dir());
  assert!(temp.path().join("broc_out/m/calc/a/b").is_dir());
}
