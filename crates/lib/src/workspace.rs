//! The rewrite root shared by every rewritten tree.
//!
//! Rewritten sources are laid out under a single root, with each original
//! absolute path mirrored beneath it. The root defaults to
//! `{temp dir}/go-rewrite` so repeated runs reuse and overwrite the same
//! location; callers can point a [`Workspace`] elsewhere to isolate runs.

use std::path::{Path, PathBuf};

use crate::consts::{REWRITE_DIR_NAME, REWRITE_ROOT_ENV};
use crate::paths::mirror_under;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
  rewrite_root: PathBuf,
}

impl Workspace {
  pub fn new(rewrite_root: impl Into<PathBuf>) -> Self {
    Self {
      rewrite_root: rewrite_root.into(),
    }
  }

  /// Workspace rooted at `TRIMBUILD_REWRITE_ROOT`, or the default root.
  pub fn from_env() -> Self {
    match std::env::var_os(REWRITE_ROOT_ENV) {
      Some(root) if !root.is_empty() => Self::new(root),
      _ => Self::default(),
    }
  }

  /// `{temp dir}/go-rewrite`. No randomization.
  pub fn default_rewrite_root() -> PathBuf {
    std::env::temp_dir().join(REWRITE_DIR_NAME)
  }

  pub fn rewrite_root(&self) -> &Path {
    &self.rewrite_root
  }

  /// Where the rewritten copy of `project_root` lives.
  pub fn work_root(&self, project_root: &Path) -> PathBuf {
    mirror_under(&self.rewrite_root, project_root)
  }
}

impl Default for Workspace {
  fn default() -> Self {
    Self::new(Self::default_rewrite_root())
  }
}
