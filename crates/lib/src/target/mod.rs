//! Build targets.
//!
//! A [`Target`] is one declared build unit: an application, a unit-test
//! application or a static library. Planning happens in [`Target::action`],
//! which scans the sources, settles on a compiler and constructs the
//! [`Builder`] for the final artifact. Nothing is executed while planning.
//!
//! Output paths are fixed when the target is declared:
//!
//! - application: `<root>/<module>/output/bin/<name>`
//! - unit test: `<root>/<module>/output/test/<name>`
//! - static library: `<root>/<module>/output/lib/lib<name without extension>.a`
//!
//! Targets share their [`Environment`] read-only and mutate nothing outside
//! themselves, so distinct targets may be planned from different threads.
//! Proto units generating a target's sources must have finished before its
//! `action` runs; the caller is responsible for that ordering.

mod types;

pub use types::*;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::builder::{ArchiveBuilder, Builder, LinkBuilder};
use crate::command::{CommandChain, CommandLine, mkdir_p};
use crate::env::Environment;
use crate::execute::{CommandExecutor, ExecuteError};
use crate::source::{SourceUnit, TargetKey};
use crate::util::path::{contained, normalize, strip_extension};

#[derive(Debug, Clone)]
pub struct Target {
  name: String,
  env: Arc<Environment>,
  sources: Vec<SourceUnit>,
  in_files: BTreeSet<PathBuf>,
  libs: BTreeSet<PathBuf>,
  compiler: PathBuf,
  outfile: PathBuf,
  objects: Option<BTreeSet<PathBuf>>,
  compile_commands: Vec<CommandChain>,
  builder: Option<Builder>,
  kind: TargetKind,
}

impl Target {
  fn new(
    name: &str,
    env: Arc<Environment>,
    sources: Vec<SourceUnit>,
    libs: Vec<PathBuf>,
    kind: TargetKind,
  ) -> Result<Self, TargetError> {
    if name.is_empty() {
      return Err(TargetError::EmptyName);
    }
    if sources.is_empty() && !matches!(kind, TargetKind::StaticLibrary) {
      return Err(TargetError::NoSources {
        kind: kind.as_str(),
        name: name.to_string(),
      });
    }

    check_sources(name, &sources)?;

    let artifact = match kind {
      TargetKind::StaticLibrary => library_file_name(name),
      _ => name.to_string(),
    };
    let outfile = normalize(
      &env
        .module_output_dir()
        .join("output")
        .join(kind.output_subdir())
        .join(artifact),
    );

    let in_files = sources.iter().map(|s| s.input().to_path_buf()).collect();
    let libs = libs.iter().map(|l| normalize(l)).collect();

    Ok(Self {
      name: name.to_string(),
      compiler: env.cc().to_path_buf(),
      env,
      sources,
      in_files,
      libs,
      outfile,
      objects: None,
      compile_commands: Vec::new(),
      builder: None,
      kind,
    })
  }

  /// Declare an executable.
  ///
  /// When `link_options` is empty the module's global link flags are used.
  pub fn application(
    name: &str,
    env: Arc<Environment>,
    sources: Vec<SourceUnit>,
    link_options: Vec<String>,
    libs: Vec<PathBuf>,
  ) -> Result<Self, TargetError> {
    Self::new(name, env, sources, libs, TargetKind::Application { link_options })
  }

  /// Declare a unit-test executable run with `ut_args`.
  pub fn ut_application(
    name: &str,
    env: Arc<Environment>,
    sources: Vec<SourceUnit>,
    link_options: Vec<String>,
    libs: Vec<PathBuf>,
    ut_args: Vec<String>,
  ) -> Result<Self, TargetError> {
    Self::new(
      name,
      env,
      sources,
      libs,
      TargetKind::UtApplication {
        link_options,
        ut_args,
        ut_cmd: None,
      },
    )
  }

  /// Declare a static library. A library without sources is a pre-built
  /// archive brought in by [`Target::precopy`].
  pub fn static_library(
    name: &str,
    env: Arc<Environment>,
    sources: Vec<SourceUnit>,
    libs: Vec<PathBuf>,
  ) -> Result<Self, TargetError> {
    Self::new(name, env, sources, libs, TargetKind::StaticLibrary)
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn key(&self) -> TargetKey {
    TargetKey::new(self.env.module_path(), &self.name)
  }

  pub fn env(&self) -> &Environment {
    &self.env
  }

  pub fn kind(&self) -> &TargetKind {
    &self.kind
  }

  /// `application`, `ut_application` or `static_library`.
  pub fn kind_name(&self) -> &'static str {
    self.kind.as_str()
  }

  pub fn sources(&self) -> &[SourceUnit] {
    &self.sources
  }

  /// Normalized input paths of every source.
  pub fn in_files(&self) -> &BTreeSet<PathBuf> {
    &self.in_files
  }

  pub fn libs(&self) -> &BTreeSet<PathBuf> {
    &self.libs
  }

  pub fn compiler(&self) -> &Path {
    &self.compiler
  }

  pub fn output_file(&self) -> &Path {
    &self.outfile
  }

  /// Object files, set once [`Target::action`] has run.
  pub fn objects(&self) -> Option<&BTreeSet<PathBuf>> {
    self.objects.as_ref()
  }

  /// Per-source compile commands, rendered with the final compiler.
  pub fn compile_commands(&self) -> &[CommandChain] {
    &self.compile_commands
  }

  pub fn builder(&self) -> Option<&Builder> {
    self.builder.as_ref()
  }

  pub fn build_command(&self) -> Option<String> {
    self.builder.as_ref().map(Builder::build_command)
  }

  /// Command running a unit test with its arguments, set once planned.
  pub fn test_invocation(&self) -> Option<&str> {
    match &self.kind {
      TargetKind::UtApplication { ut_cmd, .. } => ut_cmd.as_deref(),
      _ => None,
    }
  }

  /// Plan the target.
  ///
  /// Every source is bound to this target and scanned; a single C++ source
  /// anywhere in the set switches the compiler to the C++ compiler for good.
  /// Afterwards the variant's policy is applied and the builder constructed.
  pub fn action(&mut self) {
    self.plan_sources();

    let outfile = self.outfile.clone();
    match &mut self.kind {
      TargetKind::Application { link_options } => {
        if link_options.is_empty() {
          *link_options = self.env.ldflags().to_vec();
        }
      }
      TargetKind::UtApplication {
        link_options,
        ut_args,
        ut_cmd,
      } => {
        if link_options.is_empty() {
          *link_options = self.env.ldflags().to_vec();
        }
        *ut_cmd = Some(test_command(&outfile, ut_args));
      }
      TargetKind::StaticLibrary => {}
    }

    let builder = self.make_builder();
    debug!(key = %self.key(), cmd = %builder.build_command(), "planned target");
    self.builder = Some(builder);
  }

  fn plan_sources(&mut self) {
    let key = self.key();
    let mut objects = BTreeSet::new();

    for source in &mut self.sources {
      source.bind(&key);
      objects.insert(source.object_path_for(&self.env, &key));
      if source.kind().is_cxx() {
        self.compiler = self.env.cxx().to_path_buf();
      }
    }

    self.compile_commands = self
      .sources
      .iter()
      .filter_map(|source| source.compile_action(&self.env, &self.compiler))
      .collect();
    self.objects = Some(objects);
  }

  fn make_builder(&self) -> Builder {
    let objects = self.objects.clone().unwrap_or_default();
    let workspace = self.env.workspace().to_path_buf();

    match &self.kind {
      TargetKind::Application { link_options } | TargetKind::UtApplication { link_options, .. } => {
        Builder::Link(LinkBuilder {
          output: self.outfile.clone(),
          objects,
          libs: self.libs.clone(),
          link_options: link_options.clone(),
          compiler: self.compiler.clone(),
          workspace,
        })
      }
      TargetKind::StaticLibrary => Builder::Archive(ArchiveBuilder {
        output: self.outfile.clone(),
        objects,
        libs: self.libs.clone(),
        tool: self.env.ar().to_path_buf(),
        workspace,
      }),
    }
  }

  /// Copy a pre-built archive from `<module>/lib` into the output tree.
  ///
  /// Only valid for a static library without sources; this replaces
  /// [`Target::action`] for such libraries. Nothing is executed when the
  /// precondition does not hold.
  pub fn precopy(&self, executor: &dyn CommandExecutor) -> Result<(), TargetError> {
    if !matches!(self.kind, TargetKind::StaticLibrary) {
      return Err(TargetError::NotALibrary {
        name: self.name.clone(),
      });
    }
    if !self.sources.is_empty() {
      let err = TargetError::CopyWithSources {
        name: self.name.clone(),
      };
      error!("{}", err);
      return Err(err);
    }

    let cmd = self.precopy_command().to_string();
    info!("[PreCopy] {}", cmd);

    let output = executor.run(&cmd, false).map_err(|source| TargetError::CopyFailed {
      name: self.name.clone(),
      source,
    })?;
    if !output.success() {
      error!("[ERROR] {}\n{}", cmd, output.output);
      return Err(TargetError::CopyFailed {
        name: self.name.clone(),
        source: ExecuteError::CmdFailed {
          cmd,
          code: output.code,
          output: output.output,
        },
      });
    }
    Ok(())
  }

  /// `mkdir -p <out>/output/lib && cp -Rp <module>/lib/lib<name>.a <out>/output/lib`
  pub fn precopy_command(&self) -> CommandChain {
    let from = self.env.module_path().join("lib").join(library_file_name(&self.name));
    let to = normalize(&self.env.module_output_dir().join("output").join("lib"));
    CommandChain::new()
      .then(mkdir_p(&to))
      .then(CommandLine::new("cp").arg("-Rp").path(&from).path(&to))
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(cmd) = self.build_command() {
      f.write_str(&cmd)?;
    }
    if let Some(ut_cmd) = self.test_invocation() {
      write!(f, "\nut cmd: {}", ut_cmd)?;
    }
    Ok(())
  }
}

/// The test binary followed by its arguments, space-joined as declared.
///
/// Arguments are not quoted: `--gtest_filter=Calc.*` reaches the shell as
/// written, so callers may rely on shell expansion.
fn test_command(binary: &Path, args: &[String]) -> String {
  let mut cmd = binary.display().to_string();
  for arg in args {
    cmd.push(' ');
    cmd.push_str(arg);
  }
  cmd
}

/// Every source must sit below the module and own a distinct object file.
fn check_sources(name: &str, sources: &[SourceUnit]) -> Result<(), TargetError> {
  let mut objects: BTreeMap<PathBuf, &Path> = BTreeMap::new();
  for source in sources {
    let input = source.input();
    if input.has_root() {
      return Err(TargetError::AbsoluteSource {
        name: name.to_string(),
        input: input.to_path_buf(),
      });
    }
    if let Some(first) = objects.insert(contained(&strip_extension(input)), input)
      && first != input
    {
      return Err(TargetError::ObjectCollision {
        name: name.to_string(),
        first: first.to_path_buf(),
        second: input.to_path_buf(),
      });
    }
  }
  Ok(())
}

/// `lib<name without extension>.a`
fn library_file_name(name: &str) -> String {
  format!("lib{}.a", strip_extension(Path::new(name)).display())
}
