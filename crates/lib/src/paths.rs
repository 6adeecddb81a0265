//! Path resolution helpers.
//!
//! Everything here is lexical: paths are joined and cleaned without touching
//! the filesystem, so a rewritten tree can be described before it exists.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::util::{os_bytes, os_string_from_bytes};

#[derive(Debug, Error)]
pub enum PathError {
  #[error("get cwd error: {0}")]
  CurrentDir(#[source] std::io::Error),
}

/// Resolve `path` to an absolute, cleaned path.
///
/// Relative paths are resolved against the current working directory and an
/// empty path resolves to the current working directory itself.
pub fn to_abs_path(path: &Path) -> Result<PathBuf, PathError> {
  if path.is_absolute() {
    return Ok(normalize_path(path));
  }
  let cwd = std::env::current_dir().map_err(PathError::CurrentDir)?;
  Ok(normalize_path(&cwd.join(path)))
}

/// Place `path` underneath `root`, keeping its full directory structure.
///
/// Unlike [`Path::join`], an absolute `path` does not replace `root`:
/// `mirror_under("/tmp/go-rewrite", "/proj")` is `/tmp/go-rewrite/proj`.
pub fn mirror_under(root: &Path, path: &Path) -> PathBuf {
  let relative: PathBuf = normalize_path(path)
    .components()
    .filter(|c| matches!(c, Component::Normal(_)))
    .collect();
  normalize_path(&root.join(relative))
}

/// Go `replace` directives cannot carry `@`, so module cache paths such as
/// `.../grpc@v1.47.0/xds` are relocated to `.../grpc/v1.47.0/xds`.
pub fn clean_module_path(path: &Path) -> PathBuf {
  let cleaned = os_bytes(path.as_os_str())
    .iter()
    .map(|&b| if b == b'@' { b'/' } else { b })
    .collect();
  PathBuf::from(os_string_from_bytes(cleaned))
}

/// Normalize a path by resolving `.` and `..` components without requiring the path to exist
pub fn normalize_path(path: &Path) -> PathBuf {
  let mut components: Vec<Component<'_>> = Vec::new();

  for component in path.components() {
    match component {
      Component::ParentDir => match components.last() {
        Some(Component::Normal(_)) => {
          components.pop();
        }
        // `/..` is `/`
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
        _ => components.push(component),
      },
      Component::CurDir => {}
      other => components.push(other),
    }
  }

  components.iter().collect()
}
