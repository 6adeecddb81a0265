//! Implementation of the `trimbuild info` command.

use anyhow::Result;
use clap::Args;
use serde_json::json;

use trimbuild_lib::consts::{APP_NAME, DEFAULT_GO_BINARY, GO_BINARY_ENV};
use trimbuild_lib::toolchain::go_env;
use trimbuild_lib::workspace::Workspace;

use crate::output::{OutputFormat, Summary, print_json, print_warning};

#[derive(Debug, Args)]
pub struct InfoArgs {
  /// Go executable
  #[arg(long, env = GO_BINARY_ENV, default_value = DEFAULT_GO_BINARY)]
  go: String,
}

pub fn cmd_info(args: InfoArgs, verbose: bool, output: OutputFormat) -> Result<()> {
  let workspace = Workspace::from_env();
  let go = go_env(&args.go, verbose);

  if output.is_json() {
    return print_json(&json!({
      "rewrite_root": workspace.rewrite_root(),
      "go_binary": args.go,
      "go": go.as_ref().ok(),
      "go_error": go.as_ref().err().map(|err| err.to_string()),
    }));
  }

  println!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
  println!();
  let summary = Summary::new()
    .path("Rewrite root", workspace.rewrite_root())
    .row("Go binary", &args.go);

  match go {
    Ok(env) => summary
      .row("Go version", &env.goversion)
      .row("GOROOT", &env.goroot)
      .row("GOPATH", &env.gopath)
      .row("GOMODCACHE", &env.gomodcache)
      .row("Platform", format!("{}/{}", env.goos, env.goarch))
      .print(),
    Err(err) => {
      summary.print();
      print_warning(&format!("Go toolchain unavailable: {}", err));
    }
  }

  Ok(())
}
