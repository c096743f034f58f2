//! Implementation of the `broc plan` command.
//!
//! Instantiates the manifest, plans every unit and prints the commands a
//! build would run together with the plan fingerprint. Nothing is executed.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use broc_lib::execute::PlanSummary;
use broc_lib::util::hash::Hashable;

use crate::output::{OutputFormat, print_info, print_json, print_stat, symbols, truncate_hash};

#[derive(Serialize)]
struct PlanOutput<'a> {
  fingerprint: &'a str,
  command_count: usize,
  #[serde(flatten)]
  plan: &'a PlanSummary,
}

pub fn cmd_plan(manifest: &Path, workspace: Option<&Path>, output: OutputFormat) -> Result<()> {
  let mut set = super::load_build_set(manifest, workspace)?;
  let summary = set.plan().context("Failed to plan proto libraries")?;
  let hash = summary.compute_hash().context("Failed to compute plan fingerprint")?;

  if output.is_json() {
    return print_json(&PlanOutput {
      fingerprint: &hash.0,
      command_count: summary.command_count(),
      plan: &summary,
    });
  }

  print_info(&format!("Plan {} for {}", truncate_hash(&hash.0), summary.module.display()));

  for proto in &summary.protos {
    let names: Vec<_> = proto.protos.iter().map(|p| p.display().to_string()).collect();
    println!();
    println!("proto_library {}", names.join(" "));
    print_commands(&proto.commands);
  }

  for target in &summary.targets {
    println!();
    println!(
      "{} {} {} {}",
      target.kind,
      target.name.if_supports_color(Stream::Stdout, |s| s.bold()),
      symbols::ARROW,
      target.output.display()
    );
    print_commands(&target.compile_commands);
    print_commands(target.precopy_command.iter());
    print_commands(target.build_command.iter());
    if let Some(ref test) = target.test_command {
      print_stat("test", test);
    }
  }

  println!();
  print_stat("Units", &(summary.protos.len() + summary.targets.len()).to_string());
  print_stat("Commands", &summary.command_count().to_string());
  print_stat("Fingerprint", &hash.0);

  Ok(())
}

fn print_commands<I, S>(commands: I)
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  for cmd in commands {
    println!(
      "  {} {}",
      "$".if_supports_color(Stream::Stdout, |s| s.dimmed()),
      cmd.as_ref()
    );
  }
}
