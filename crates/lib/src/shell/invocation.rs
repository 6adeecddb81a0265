//! Commands described as an argument vector.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::shell::quote::quote_os;
use crate::shell::script::Script;
use crate::util::concat_os;

/// A program, its arguments and an optional working directory.
///
/// Invocations are spawned directly, so arguments keep their boundaries
/// without any quoting. [`Invocation::to_script`] renders the equivalent
/// shell script for logs and error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  program: String,
  args: Vec<OsString>,
  current_dir: Option<PathBuf>,
}

impl Invocation {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      current_dir: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn arg_path(mut self, path: &Path) -> Self {
    self.args.push(path.as_os_str().to_os_string());
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.current_dir = Some(dir.into());
    self
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  pub fn get_args(&self) -> &[OsString] {
    &self.args
  }

  pub fn get_current_dir(&self) -> Option<&Path> {
    self.current_dir.as_deref()
  }

  /// The quoted command line, without the working directory.
  pub fn command_line(&self) -> OsString {
    let mut line = quote_os(OsStr::new(&self.program));
    for arg in &self.args {
      line.push(" ");
      line.push(quote_os(arg));
    }
    line
  }

  /// `set -e`, `cd <dir>` and the quoted command line.
  pub fn to_script(&self) -> Script {
    let mut script = Script::strict();
    if let Some(dir) = &self.current_dir {
      script.push(concat_os([OsStr::new("cd "), quote_os(dir.as_os_str()).as_os_str()]));
    }
    script.push(self.command_line());
    script
  }

  pub(crate) fn to_command(&self) -> Command {
    let mut command = Command::new(&self.program);
    command.args(&self.args);
    if let Some(dir) = &self.current_dir {
      command.current_dir(dir);
    }
    command
  }
}
