use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::build::rewrite::RewriteError;
use crate::consts::DEFAULT_GO_BINARY;
use crate::paths::PathError;
use crate::shell::{Invocation, ShellError};
use crate::trimpath::{MappedModules, TrimPathError, TrimPaths};

/// Options for a single build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
  pub verbose: bool,
  /// Source root of the project. Relative paths resolve against the current
  /// directory; empty means the current directory.
  pub project_root: PathBuf,
  /// Disable optimizations and inlining for debuggers.
  pub debug: bool,
  /// Binary path. Defaults to `exec.bin` (`debug.bin` when `debug`) inside
  /// the project root.
  pub output: Option<PathBuf>,
  /// Go executable.
  pub go_binary: String,
  /// Original module directory -> cleaned directory under the rewrite root.
  pub mapped_mod: MappedModules,
}

impl Default for BuildOptions {
  fn default() -> Self {
    Self {
      verbose: false,
      project_root: PathBuf::new(),
      debug: false,
      output: None,
      go_binary: DEFAULT_GO_BINARY.to_string(),
      mapped_mod: MappedModules::new(),
    }
  }
}

impl BuildOptions {
  /// Module relocations reported by the rewrite step.
  pub fn with_mapped_modules(mut self, mapped_mod: MappedModules) -> Self {
    self.mapped_mod = mapped_mod;
    self
  }
}

/// Everything a build would run, resolved but not executed.
#[derive(Debug, Clone)]
pub struct BuildPlan {
  pub project_root: PathBuf,
  pub output: PathBuf,
  pub rewrite_root: PathBuf,
  /// The project's mirror under the rewrite root; the compiler runs here.
  pub work_root: PathBuf,
  pub trim_paths: TrimPaths,
  /// Flags applied to all packages, in order.
  pub gcflags: Vec<String>,
  pub invocation: Invocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildResult {
  pub output: PathBuf,
}

#[derive(Debug, Error)]
pub enum BuildError {
  #[error("make abs path err: {0}")]
  Path(#[from] PathError),

  #[error(transparent)]
  TrimPath(#[from] TrimPathError),

  #[error("rewrite failed: {0}")]
  Rewrite(#[from] RewriteError),

  #[error("rewritten project not found at {}", path.display())]
  MissingWorkRoot { path: PathBuf },

  #[error("build {} failed: {source}", output.display())]
  Failed {
    output: PathBuf,
    #[source]
    source: ShellError,
  },
}
