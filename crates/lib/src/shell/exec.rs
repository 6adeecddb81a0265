//! Running scripts and invocations as child processes.
//!
//! Every call spawns exactly one process and blocks until it exits. Stdout and
//! stderr are always captured so failures can report them in full.

use std::process::{Command, Output};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::consts::DEFAULT_SHELL;
use crate::shell::invocation::Invocation;
use crate::shell::script::Script;
use crate::shell::types::{RunOptions, RunOutput, ShellError};

/// Run `script` with `bash -c` (or the shell set in `options`).
pub fn run_script(script: &Script, options: &RunOptions) -> Result<RunOutput, ShellError> {
  let output = capture_script(script, options)?;
  Ok(select_streams(output, options))
}

/// Run `script` and decode its stdout as JSON into `T`.
pub fn run_script_json<T: DeserializeOwned>(script: &Script, options: &RunOptions) -> Result<T, ShellError> {
  let output = capture_script(script, options)?;
  serde_json::from_slice(&output.stdout).map_err(|source| ShellError::Decode {
    type_name: std::any::type_name::<T>(),
    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
    source,
  })
}

/// Spawn `invocation` directly, without a shell.
///
/// Errors report the equivalent shell script from [`Invocation::to_script`].
pub fn run_invocation(invocation: &Invocation, options: &RunOptions) -> Result<RunOutput, ShellError> {
  let script = invocation.to_script().render();
  let output = capture(invocation.to_command(), script, options)?;
  Ok(select_streams(output, options))
}

fn capture_script(script: &Script, options: &RunOptions) -> Result<Output, ShellError> {
  let (shell, shell_args) = get_shell(options.shell.as_deref());

  let mut command = Command::new(&shell);
  command.args(&shell_args).arg(script.render_os());

  capture(command, script.render(), options)
}

fn capture(mut command: Command, script: String, options: &RunOptions) -> Result<Output, ShellError> {
  if options.verbose {
    info!("{}", script);
  } else {
    debug!(script = %script, "running command");
  }

  let output = match command.output() {
    Ok(output) => output,
    Err(source) => return Err(ShellError::Spawn { script, source }),
  };

  if !output.status.success() {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !stderr.is_empty() {
      debug!(stderr = %stderr, "command stderr");
    }

    return Err(ShellError::Failed {
      script,
      status: output.status,
      stdout,
      stderr,
    });
  }

  Ok(output)
}

fn select_streams(output: Output, options: &RunOptions) -> RunOutput {
  RunOutput {
    stdout: options
      .need_stdout
      .then(|| String::from_utf8_lossy(&output.stdout).into_owned()),
    stderr: options
      .need_stderr
      .then(|| String::from_utf8_lossy(&output.stderr).into_owned()),
  }
}

/// Get the shell command and argument used to run scripts.
///
/// Scripts rely on bash by default; an override is assumed to accept `-c`.
fn get_shell(override_shell: Option<&str>) -> (String, Vec<String>) {
  let shell = override_shell.unwrap_or(DEFAULT_SHELL);
  (shell.to_string(), vec!["-c".to_string()])
}
