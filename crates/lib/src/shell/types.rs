//! Options, outputs and errors of the shell primitive.

use std::process::ExitStatus;

use thiserror::Error;

/// Options for running a script or invocation.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
  /// Log the command at `info` instead of `debug`.
  pub verbose: bool,
  /// Return captured stdout in [`RunOutput::stdout`].
  pub need_stdout: bool,
  /// Return captured stderr in [`RunOutput::stderr`].
  pub need_stderr: bool,
  /// Shell used for scripts. Defaults to `bash`.
  pub shell: Option<String>,
}

impl RunOptions {
  pub fn verbose(verbose: bool) -> Self {
    Self {
      verbose,
      ..Default::default()
    }
  }
}

/// Captured streams, present only when requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
  pub stdout: Option<String>,
  pub stderr: Option<String>,
}

/// Errors produced while running shell commands.
///
/// `script` is always the complete command text, so the failure can be
/// reproduced by hand.
#[derive(Debug, Error)]
pub enum ShellError {
  /// The process could not be started.
  #[error("running cmd error: cmd {script} {source}")]
  Spawn {
    script: String,
    #[source]
    source: std::io::Error,
  },

  /// The process exited unsuccessfully.
  #[error("running cmd error: cmd {script} {status} stdout:{stdout} stderr:{stderr}")]
  Failed {
    script: String,
    status: ExitStatus,
    stdout: String,
    stderr: String,
  },

  /// Stdout could not be decoded into the requested type.
  #[error("parse command output to {type_name} error: {source}")]
  Decode {
    type_name: &'static str,
    stdout: String,
    #[source]
    source: serde_json::Error,
  },
}

impl ShellError {
  /// Exit code of a failed process, if it exited normally.
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      ShellError::Failed { status, .. } => status.code(),
      _ => None,
    }
  }

  pub fn script(&self) -> Option<&str> {
    match self {
      ShellError::Spawn { script, .. } | ShellError::Failed { script, .. } => Some(script),
      ShellError::Decode { .. } => None,
    }
  }
}
