mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{cmd_build, cmd_info, cmd_plan};
use output::OutputFormat;

/// broc - plan and run C/C++ module builds
#[derive(Parser)]
#[command(name = "broc")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Workspace root, overriding the manifest's
  #[arg(long, global = true)]
  workspace: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Print every command a build would run, without running any
  Plan {
    /// Path to the build manifest
    #[arg(default_value = "BROC.json")]
    manifest: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },

  /// Run the build
  Build {
    /// Path to the build manifest
    #[arg(default_value = "BROC.json")]
    manifest: PathBuf,

    /// Also run unit-test applications
    #[arg(long)]
    test: bool,
  },

  /// Show version and toolchain defaults
  Info,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Plan { manifest, output } => cmd_plan(&manifest, cli.workspace.as_deref(), output),
    Commands::Build { manifest, test } => cmd_build(&manifest, cli.workspace.as_deref(), test, cli.verbose),
    Commands::Info => {
      cmd_info();
      Ok(())
    }
  }
}
