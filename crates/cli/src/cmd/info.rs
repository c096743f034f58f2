use broc_lib::consts::{DEFAULT_AR, DEFAULT_CC, DEFAULT_CXX, DEFAULT_OUTPUT_ROOT, DEFAULT_PROTOC};
use broc_lib::env::{ENV_AR, ENV_CC, ENV_CXX, ENV_PROTOC};

use crate::output::print_stat;

pub fn cmd_info() {
  println!("broc {}", env!("CARGO_PKG_VERSION"));
  println!("Toolchain:");
  for (label, var, default) in [
    ("cc", ENV_CC, DEFAULT_CC),
    ("cxx", ENV_CXX, DEFAULT_CXX),
    ("ar", ENV_AR, DEFAULT_AR),
    ("protoc", ENV_PROTOC, DEFAULT_PROTOC),
  ] {
    match std::env::var(var) {
      Ok(value) if !value.is_empty() => print_stat(label, &format!("{} (from {})", value, var)),
      _ => print_stat(label, default),
    }
  }
  print_stat("output root", DEFAULT_OUTPUT_ROOT);
}
