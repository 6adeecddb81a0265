//! Shell scripts assembled from individual statements.

use std::ffi::OsString;
use std::fmt;

use crate::util::{os_bytes, os_string_from_bytes};

/// Statement endings that already separate commands.
const SEPARATOR_SUFFIXES: &[&[u8]] = &[b"\n", b"&&", b"||", b";"];

/// An ordered list of shell statements rendered into one script.
///
/// Statements are OS strings so quoted paths keep their exact bytes. They are
/// trimmed and blank ones dropped. The script does not add `set -e` on its
/// own; use [`Script::strict`] when any failure must abort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
  statements: Vec<OsString>,
}

impl Script {
  pub fn new() -> Self {
    Self::default()
  }

  /// A script starting with `set -e`.
  pub fn strict() -> Self {
    let mut script = Self::new();
    script.push("set -e");
    script
  }

  pub fn push(&mut self, statement: impl Into<OsString>) -> &mut Self {
    self.statements.push(statement.into());
    self
  }

  pub fn statements(&self) -> &[OsString] {
    &self.statements
  }

  /// The exact script passed to `bash -c`.
  ///
  /// Every statement but the last is followed by a newline unless it already
  /// ends in a line terminator or a control operator.
  pub fn render_os(&self) -> OsString {
    let statements: Vec<Vec<u8>> = self
      .statements
      .iter()
      .map(|s| os_bytes(s).trim_ascii().to_vec())
      .filter(|s| !s.is_empty())
      .collect();

    let mut out = Vec::new();
    for (i, statement) in statements.iter().enumerate() {
      out.extend_from_slice(statement);
      if i + 1 == statements.len() {
        continue;
      }
      if SEPARATOR_SUFFIXES.iter().any(|suffix| statement.ends_with(suffix)) {
        out.push(b' ');
        continue;
      }
      out.push(b'\n');
    }
    os_string_from_bytes(out)
  }

  /// [`Script::render_os`] as text for logs and error messages.
  pub fn render(&self) -> String {
    self.render_os().to_string_lossy().into_owned()
  }
}

impl fmt::Display for Script {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.render())
  }
}

impl<S: Into<OsString>> FromIterator<S> for Script {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self {
      statements: iter.into_iter().map(Into::into).collect(),
    }
  }
}
