//! Building a Go program from its rewritten copy.
//!
//! The compiler runs inside the project's mirror under the rewrite root. A
//! single `-trimpath` flag maps the mirror (and every relocated module) back
//! to the original directories, so debug info and stack traces point at the
//! real sources.
//!
//! # Submodules
//!
//! - [`rewrite`] - the rewrite step that produces the mirror and module mapping

pub mod rewrite;
mod types;

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::consts::{DEFAULT_DEBUG_OUTPUT, DEFAULT_OUTPUT};
use crate::paths::{mirror_under, to_abs_path};
use crate::shell::{Invocation, RunOptions, quote_all, run_invocation};
use crate::trimpath::TrimPaths;
use crate::workspace::Workspace;

pub use rewrite::{MirrorRewriter, RewriteError, RewriteResult, Rewriter, build_rewrite};
pub use types::*;

/// Disable optimizations and inlining.
const DEBUG_GCFLAGS: [&str; 2] = ["-N", "-l"];

/// Resolve paths and assemble the compiler invocation without running it.
///
/// `args` are passed to `go build` after the generated flags, unchanged.
pub fn plan_build(args: &[String], workspace: &Workspace, options: &BuildOptions) -> Result<BuildPlan, BuildError> {
  let project_root = to_abs_path(&options.project_root)?;

  let output = match &options.output {
    Some(output) if !output.as_os_str().is_empty() => to_abs_path(output)?,
    _ => default_output(&project_root, options.debug),
  };

  let rewrite_root = to_abs_path(workspace.rewrite_root())?;
  let work_root = mirror_under(&rewrite_root, &project_root);
  let trim_paths = TrimPaths::for_project(&rewrite_root, &project_root, &options.mapped_mod)?;

  let mut gcflags: Vec<String> = Vec::new();
  if options.debug {
    gcflags.extend(DEBUG_GCFLAGS.iter().map(|flag| flag.to_string()));
  }
  gcflags.push(trim_paths.flag());

  // Go splits the gcflags value with its own quoting rules, so each flag is
  // quoted before the list is joined into one argument.
  let invocation = Invocation::new(&options.go_binary)
    .arg("build")
    .arg("-o")
    .arg_path(&output)
    .arg(format!("-gcflags=all={}", quote_all(&gcflags)))
    .args(args.iter().cloned())
    .current_dir(&work_root);

  Ok(BuildPlan {
    project_root,
    output,
    rewrite_root,
    work_root,
    trim_paths,
    gcflags,
    invocation,
  })
}

/// Build the rewritten project and return the resolved output path.
///
/// A failed compile is terminal for this call; the error carries the full
/// command and both output streams.
pub fn build(args: &[String], workspace: &Workspace, options: &BuildOptions) -> Result<BuildResult, BuildError> {
  let plan = plan_build(args, workspace, options)?;

  if !plan.work_root.is_dir() {
    return Err(BuildError::MissingWorkRoot { path: plan.work_root });
  }

  if let Err(source) = run_invocation(&plan.invocation, &RunOptions::verbose(options.verbose)) {
    error!(output = %plan.output.display(), "build failed");
    return Err(BuildError::Failed {
      output: plan.output,
      source,
    });
  }

  if options.verbose {
    info!(output = %plan.output.display(), "build successful");
  }

  Ok(BuildResult { output: plan.output })
}

/// Default binary name for a build.
pub fn default_output(project_root: &Path, debug: bool) -> PathBuf {
  project_root.join(if debug { DEFAULT_DEBUG_OUTPUT } else { DEFAULT_OUTPUT })
}
