//! Trim-path rules for the Go compiler.
//!
//! A build runs inside the rewrite root, so the paths recorded in debug info
//! point at rewritten copies. Each [`TrimRule`] maps a rewritten prefix back
//! to the original absolute directory, which is what debuggers and stack
//! traces should show.
//!
//! `-trimpath` may only be given once (the last occurrence wins), so all rules
//! are merged into one flag value: `from=>to` pairs separated by `;`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::paths::mirror_under;

/// Original absolute module directory -> cleaned directory under the rewrite root.
///
/// Ordered by original directory so the generated flag is reproducible.
pub type MappedModules = BTreeMap<PathBuf, PathBuf>;

const PAIR_SEPARATOR: &str = "=>";
const RULE_SEPARATOR: &str = ";";

#[derive(Debug, Error)]
pub enum TrimPathError {
  /// Debuggers cannot resolve a path rewritten to nothing.
  #[error("trimPath to must not be empty: {}", from.display())]
  EmptyTarget { from: PathBuf },
}

/// Replace the absolute prefix `from` with `to` in debug info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimRule {
  from: PathBuf,
  to: PathBuf,
}

impl TrimRule {
  pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Result<Self, TrimPathError> {
    let from = from.into();
    let to = to.into();
    if to.as_os_str().is_empty() {
      return Err(TrimPathError::EmptyTarget { from });
    }
    if to == Path::new("/") {
      // Go accepts it, but debuggers resolve such paths unreliably.
      warn!(
        from = %from.display(),
        to = %to.display(),
        "trim path found / replacement, should contain at least one child"
      );
    }
    Ok(Self { from, to })
  }

  pub fn from(&self) -> &Path {
    &self.from
  }

  pub fn to(&self) -> &Path {
    &self.to
  }
}

impl fmt::Display for TrimRule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}{}", self.from.display(), PAIR_SEPARATOR, self.to.display())
  }
}

/// The ordered rule list of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimPaths {
  rules: Vec<TrimRule>,
}

impl TrimPaths {
  /// Rules for a project built from its mirror under `rewrite_root`.
  ///
  /// The project rule always comes first so the project's own files resolve
  /// before any module rule is considered. Module rules follow in the order
  /// of their original directories.
  pub fn for_project(
    rewrite_root: &Path,
    project_root: &Path,
    mapped_mod: &MappedModules,
  ) -> Result<Self, TrimPathError> {
    let mut rules = Vec::with_capacity(mapped_mod.len() + 1);
    rules.push(TrimRule::new(mirror_under(rewrite_root, project_root), project_root)?);
    for (orig_dir, cleaned_dir) in mapped_mod {
      rules.push(TrimRule::new(mirror_under(rewrite_root, cleaned_dir), orig_dir.clone())?);
    }
    Ok(Self { rules })
  }

  pub fn rules(&self) -> &[TrimRule] {
    &self.rules
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  /// `from=>to;from=>to...`
  pub fn value(&self) -> String {
    self
      .rules
      .iter()
      .map(ToString::to_string)
      .collect::<Vec<_>>()
      .join(RULE_SEPARATOR)
  }

  /// The `-trimpath=...` compiler flag.
  pub fn flag(&self) -> String {
    format!("-trimpath={}", self.value())
  }
}
