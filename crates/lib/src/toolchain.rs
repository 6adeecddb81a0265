//! Facts about the Go toolchain used for builds.

use serde::{Deserialize, Serialize};

use crate::shell::{RunOptions, Script, ShellError, quote, run_script_json};

/// Subset of `go env -json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct GoEnv {
  #[serde(default)]
  pub goversion: String,
  #[serde(default)]
  pub goroot: String,
  #[serde(default)]
  pub gopath: String,
  #[serde(default)]
  pub gomodcache: String,
  #[serde(default)]
  pub goos: String,
  #[serde(default)]
  pub goarch: String,
}

const GO_ENV_VARS: &[&str] = &["GOVERSION", "GOROOT", "GOPATH", "GOMODCACHE", "GOOS", "GOARCH"];

/// Query `go env -json` through the given Go executable.
pub fn go_env(go_binary: &str, verbose: bool) -> Result<GoEnv, ShellError> {
  let mut script = Script::strict();
  script.push(format!("{} env -json {}", quote(go_binary), GO_ENV_VARS.join(" ")));
  run_script_json(&script, &RunOptions::verbose(verbose))
}
