//! First-level filtering of overlay sources.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::Path;

use tracing::debug;

use crate::overlay::CopyError;

/// Names of the immediate children of `src_dir` that belong in the overlay.
///
/// Ignored names and non-directories larger than `max_file_size` are
/// dropped. Directories are always kept; their contents are not inspected.
/// Symlinks are judged by the link itself, not its target. The result is
/// sorted by name. Names are kept as raw OS strings, whatever their encoding.
pub(crate) fn overlay_entries(
  src_dir: &Path,
  ignore: &HashSet<&str>,
  max_file_size: u64,
) -> Result<Vec<OsString>, CopyError> {
  let list_err = |source| CopyError::ListDir {
    path: src_dir.to_path_buf(),
    source,
  };

  let mut names = Vec::new();
  for entry in std::fs::read_dir(src_dir).map_err(list_err)? {
    let entry = entry.map_err(list_err)?;
    let metadata = entry.metadata().map_err(list_err)?;

    let name = entry.file_name();

    if name.to_str().is_some_and(|name| ignore.contains(name)) {
      debug!(name = %name.to_string_lossy(), "ignored");
      continue;
    }
    if !metadata.is_dir() && metadata.len() > max_file_size {
      debug!(name = %name.to_string_lossy(), size = metadata.len(), "too large for overlay");
      continue;
    }
    names.push(name);
  }

  names.sort();
  Ok(names)
}
