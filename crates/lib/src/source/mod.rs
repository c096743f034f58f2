//! Source files bound to a target.
//!
//! A [`SourceUnit`] knows its language and how to derive its object path.
//! It does not pick a compiler: the owning target decides that after it has
//! seen every source, so compile commands are rendered only once the
//! target's compiler is final.
//!
//! A unit refers back to its owner through a [`TargetKey`], a plain value
//! the orchestrator can look targets up by. No reference to the target is
//! held.

mod types;

pub use types::*;

use std::path::{Path, PathBuf};

use crate::command::{CommandChain, CommandLine, mkdir_p};
use crate::env::Environment;
use crate::util::path::{contained, normalize, strip_extension};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
  input: PathBuf,
  kind: LanguageKind,
  owner: Option<TargetKey>,
}

impl SourceUnit {
  /// Create a unit for `input`, a path relative to the module directory.
  pub fn new(input: impl AsRef<Path>) -> Self {
    let input = normalize(input.as_ref());
    let kind = LanguageKind::from_path(&input);
    Self {
      input,
      kind,
      owner: None,
    }
  }

  pub fn input(&self) -> &Path {
    &self.input
  }

  pub fn kind(&self) -> LanguageKind {
    self.kind
  }

  pub fn owner(&self) -> Option<&TargetKey> {
    self.owner.as_ref()
  }

  /// Record the owning target.
  ///
  /// The first binding wins; later calls with the same key are no-ops.
  pub fn bind(&mut self, owner: &TargetKey) {
    match &self.owner {
      None => self.owner = Some(owner.clone()),
      Some(existing) => debug_assert_eq!(existing, owner, "source {} rebound to another target", self.input.display()),
    }
  }

  /// Object path for this unit, once bound.
  pub fn object_path(&self, env: &Environment) -> Option<PathBuf> {
    self.owner.as_ref().map(|owner| self.object_path_for(env, owner))
  }

  /// `<output_root>/<module_path>/objs/<target>/<input without extension>.o`
  ///
  /// Inputs reaching outside the module keep their place under `objs` with
  /// each `..` spelled `__`.
  pub fn object_path_for(&self, env: &Environment, owner: &TargetKey) -> PathBuf {
    let mut object = env
      .module_output_dir()
      .join("objs")
      .join(&owner.name)
      .join(contained(&strip_extension(&self.input)))
      .into_os_string();
    object.push(".o");
    PathBuf::from(object)
  }

  /// Path of the source as seen from the workspace root.
  pub fn workspace_path(&self, env: &Environment) -> PathBuf {
    normalize(&env.module_path().join(&self.input))
  }

  /// Compile command for this unit with the target's final `compiler`.
  ///
  /// Returns `None` until the unit is bound to a target.
  pub fn compile_action(&self, env: &Environment, compiler: &Path) -> Option<CommandChain> {
    let object = self.object_path(env)?;

    let language_flags: &[String] = match self.kind {
      LanguageKind::C => env.cflags(),
      LanguageKind::Cxx => env.cxxflags(),
      LanguageKind::Other => &[],
    };

    let mut compile = CommandLine::new(compiler.to_string_lossy())
      .arg("-c")
      .args(env.cppflags().iter().cloned())
      .args(language_flags.iter().cloned());
    for include in env.includes() {
      compile = compile.arg(format!("-I{}", include.display()));
    }
    let compile = compile.arg("-o").path(&object).path(&self.workspace_path(env));

    let mut chain = CommandChain::new();
    if let Some(dir) = object.parent() {
      chain = chain.then(mkdir_p(dir));
    }
    Some(chain.then(compile))
  }
}
