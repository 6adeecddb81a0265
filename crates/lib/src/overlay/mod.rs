//! Filtered directory mirrors.
//!
//! [`copy_dirs`] recreates each source directory under a destination root,
//! keeping the source's full path beneath it. Only the first level of each
//! source is filtered; surviving entries are copied recursively with `cp -R`
//! and the whole mirror is made world-writable afterwards.
//!
//! The destination root is removed before copying, so an overlay never keeps
//! stale content from a previous run.

mod listing;

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::consts::MAX_OVERLAY_FILE_SIZE;
use crate::paths::{mirror_under, normalize_path};
use crate::shell::{RunOptions, Script, ShellError, quote_os, run_script};
use crate::util::concat_os;

use listing::overlay_entries;

/// Maps a destination directory to where it should really go. `None` (or an
/// empty path) skips the source directory entirely.
pub type ProcessDest = Box<dyn Fn(&Path) -> Option<PathBuf>>;

pub struct CopyOptions {
  pub verbose: bool,
  /// First-level names left out of every source directory.
  pub ignore_names: Vec<String>,
  pub process_dest: Option<ProcessDest>,
  /// Non-directories above this size are left out.
  pub max_file_size: u64,
}

impl Default for CopyOptions {
  fn default() -> Self {
    Self {
      verbose: false,
      ignore_names: Vec::new(),
      process_dest: None,
      max_file_size: MAX_OVERLAY_FILE_SIZE,
    }
  }
}

impl fmt::Debug for CopyOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CopyOptions")
      .field("verbose", &self.verbose)
      .field("ignore_names", &self.ignore_names)
      .field("process_dest", &self.process_dest.is_some())
      .field("max_file_size", &self.max_file_size)
      .finish()
  }
}

#[derive(Debug, Error)]
pub enum CopyError {
  #[error("copy dirs: empty src dirs")]
  EmptySources,

  #[error("copy dirs: src dirs contains empty dir at {index}")]
  EmptySource { index: usize },

  #[error("copy dirs: no dest root")]
  MissingDestRoot,

  #[error("copy dirs: dest root cannot be /")]
  DestRootIsFsRoot,

  #[error("list file of {} error: {source}", path.display())]
  ListDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Shell(#[from] ShellError),
}

impl CopyError {
  /// Whether the error comes from invalid arguments rather than the filesystem.
  pub fn is_config_error(&self) -> bool {
    matches!(
      self,
      CopyError::EmptySources | CopyError::EmptySource { .. } | CopyError::MissingDestRoot | CopyError::DestRootIsFsRoot
    )
  }
}

/// Mirror `src_dirs` under `dest_root`.
///
/// Arguments are validated and every source listed before anything on disk
/// changes. `dest_root` is then deleted and rebuilt.
pub fn copy_dirs(src_dirs: &[PathBuf], dest_root: &Path, options: &CopyOptions) -> Result<(), CopyError> {
  validate(src_dirs, dest_root)?;

  let ignore: HashSet<&str> = options.ignore_names.iter().map(String::as_str).collect();

  let listings = src_dirs
    .iter()
    .map(|src_dir| overlay_entries(src_dir, &ignore, options.max_file_size))
    .collect::<Result<Vec<_>, _>>()?;

  let script = overlay_script(src_dirs, &listings, dest_root, options.process_dest.as_ref());

  if options.verbose {
    info!(src_dirs = ?src_dirs, dest_root = %dest_root.display(), "copying dirs");
  }

  run_script(&script, &RunOptions::verbose(options.verbose))?;
  Ok(())
}

fn validate(src_dirs: &[PathBuf], dest_root: &Path) -> Result<(), CopyError> {
  if src_dirs.is_empty() {
    return Err(CopyError::EmptySources);
  }
  if let Some(index) = src_dirs.iter().position(|dir| dir.as_os_str().is_empty()) {
    return Err(CopyError::EmptySource { index });
  }
  if dest_root.as_os_str().is_empty() {
    return Err(CopyError::MissingDestRoot);
  }
  if normalize_path(dest_root) == Path::new("/") {
    return Err(CopyError::DestRootIsFsRoot);
  }
  Ok(())
}

fn overlay_script(
  src_dirs: &[PathBuf],
  listings: &[Vec<OsString>],
  dest_root: &Path,
  process_dest: Option<&ProcessDest>,
) -> Script {
  let mut script = Script::strict();
  let qroot = quote_path(dest_root);
  script.push(statement(&[OsStr::new("rm -rf "), &qroot]));
  script.push(statement(&[OsStr::new("mkdir -p "), &qroot]));

  for (src_dir, names) in src_dirs.iter().zip(listings) {
    if names.is_empty() {
      continue;
    }

    let mut dst_dir = mirror_under(dest_root, src_dir);
    if let Some(process) = process_dest {
      match process(&dst_dir) {
        Some(dir) if !dir.as_os_str().is_empty() => dst_dir = dir,
        _ => {
          debug!(src_dir = %src_dir.display(), "destination suppressed");
          continue;
        }
      }
    }

    let qsrc = quote_path(src_dir);
    let qdst = quote_path(&dst_dir);

    script.push(statement(&[OsStr::new("rm -rf "), &qdst, OsStr::new(" && mkdir -p "), &qdst]));
    for name in names {
      let qname = quote_os(name);
      let sep = OsStr::new("/");
      script.push(statement(&[OsStr::new("cp -R "), &qsrc, sep, &qname, OsStr::new(" "), &qdst, sep, &qname]));
    }
    script.push(statement(&[OsStr::new("chmod -R 0777 "), &qdst]));
  }

  script
}

fn quote_path(path: &Path) -> OsString {
  quote_os(path.as_os_str())
}

fn statement(parts: &[&OsStr]) -> OsString {
  concat_os(parts)
}
