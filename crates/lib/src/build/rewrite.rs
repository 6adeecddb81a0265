//! The rewrite step that precedes a build.
//!
//! A [`Rewriter`] materializes the project under the rewrite root (mirroring
//! its absolute path) and reports which module directories it relocated.
//! Instrumenting rewriters live outside this crate; [`MirrorRewriter`] only
//! copies sources and is enough to build through the overlay unchanged.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::build::{BuildError, BuildOptions, BuildResult, build};
use crate::overlay::{CopyError, CopyOptions, copy_dirs};
use crate::paths::{PathError, clean_module_path, mirror_under, to_abs_path};
use crate::trimpath::MappedModules;
use crate::workspace::Workspace;

#[derive(Debug, Error)]
pub enum RewriteError {
  #[error("copy into rewrite root failed: {0}")]
  Copy(#[from] CopyError),

  #[error(transparent)]
  Path(#[from] PathError),

  #[error("{0}")]
  Other(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteResult {
  /// Original absolute module directory -> cleaned directory under the rewrite root.
  pub mapped_mod: MappedModules,
}

pub trait Rewriter {
  /// Write the rewritten tree for `project_root` under `rewrite_root`.
  ///
  /// `args` are the build arguments, so a rewriter can limit itself to the
  /// packages being built.
  fn rewrite(&self, args: &[String], rewrite_root: &Path, project_root: &Path) -> Result<RewriteResult, RewriteError>;
}

/// Rewrite the project, then build it with the reported module mapping.
pub fn build_rewrite(
  args: &[String],
  rewriter: &dyn Rewriter,
  workspace: &Workspace,
  options: BuildOptions,
) -> Result<BuildResult, BuildError> {
  let project_root = to_abs_path(&options.project_root)?;
  let rewrite_root = to_abs_path(workspace.rewrite_root())?;

  let result = rewriter.rewrite(args, &rewrite_root, &project_root)?;
  if options.verbose {
    info!(modules = result.mapped_mod.len(), "rewrite finished");
  }

  let options = BuildOptions {
    project_root,
    ..options
  }
  .with_mapped_modules(result.mapped_mod);
  build(args, workspace, &options)
}

/// Copies the project and selected module directories into the rewrite root
/// without modifying them.
///
/// Modules are relocated with `@` replaced by `/`, the layout Go `replace`
/// directives accept.
#[derive(Debug, Clone, Default)]
pub struct MirrorRewriter {
  pub verbose: bool,
  pub ignore_names: Vec<String>,
  /// Module directories copied next to the project.
  pub modules: Vec<PathBuf>,
}

impl Rewriter for MirrorRewriter {
  fn rewrite(&self, _args: &[String], rewrite_root: &Path, project_root: &Path) -> Result<RewriteResult, RewriteError> {
    let mut src_dirs = vec![project_root.to_path_buf()];
    let mut mapped_mod = MappedModules::new();
    for module in &self.modules {
      let orig_dir = to_abs_path(module)?;
      mapped_mod.insert(orig_dir.clone(), clean_module_path(&orig_dir));
      src_dirs.push(orig_dir);
    }

    let root = rewrite_root.to_path_buf();
    let work_root = mirror_under(rewrite_root, project_root);
    let options = CopyOptions {
      verbose: self.verbose,
      ignore_names: self.ignore_names.clone(),
      process_dest: Some(Box::new(move |dest: &Path| {
        if dest == work_root {
          return Some(dest.to_path_buf());
        }
        let relative = dest.strip_prefix(&root).ok()?;
        Some(root.join(clean_module_path(relative)))
      })),
      ..Default::default()
    };

    copy_dirs(&src_dirs, rewrite_root, &options)?;
    Ok(RewriteResult { mapped_mod })
  }
}
