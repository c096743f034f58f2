//! Lexical path helpers.
//!
//! Nothing here touches the filesystem: planned paths usually do not exist
//! yet when they are computed.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Normalize a path without consulting the filesystem.
///
/// Removes `.` components and resolves `..` against the preceding normal
/// component. Leading `..` of a relative path is kept; `..` directly under
/// the root is dropped. An empty result becomes `.`.
pub fn normalize(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::ParentDir => match normalized.components().next_back() {
        Some(Component::Normal(_)) => {
          normalized.pop();
        }
        Some(Component::RootDir | Component::Prefix(_)) => {}
        _ => normalized.push(Component::ParentDir),
      },
      Component::CurDir => {}
      _ => normalized.push(component),
    }
  }
  if normalized.as_os_str().is_empty() {
    PathBuf::from(".")
  } else {
    normalized
  }
}

/// Return `path` with its final extension removed, keeping the directory.
pub fn strip_extension(path: &Path) -> PathBuf {
  match path.file_stem() {
    Some(stem) => path.with_file_name(stem),
    None => path.to_path_buf(),
  }
}

/// Relative form of `path` that stays below whatever it is joined to.
///
/// The root is dropped and every `..` becomes `__`, so `../common/a.c` maps to
/// `__/common/a.c`.
pub fn contained(path: &Path) -> PathBuf {
  path
    .components()
    .filter_map(|component| match component {
      Component::Normal(part) => Some(part),
      Component::ParentDir => Some(OsStr::new("__")),
      Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
    })
    .collect()
}

/// First component of a relative path, if the path has more than one.
pub fn first_segment(path: &Path) -> Option<&Path> {
  let mut components = path.components();
  let first = components.next()?;
  components.next()?;
  Some(Path::new(first.as_os_str()))
}
