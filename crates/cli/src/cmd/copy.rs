//! Implementation of the `trimbuild copy` command.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use trimbuild_lib::consts::MAX_OVERLAY_FILE_SIZE;
use trimbuild_lib::overlay::{CopyOptions, copy_dirs};

use crate::output::{OutputFormat, Summary, format_bytes, format_duration, print_json, print_success};

#[derive(Debug, Args)]
pub struct CopyArgs {
  /// Source directories to mirror
  #[arg(required = true, value_name = "SRC")]
  sources: Vec<PathBuf>,

  /// Destination root; each source lands at <dest>/<source path>
  #[arg(long, value_name = "DIR")]
  dest: PathBuf,

  /// Top-level name left out of every source, repeatable
  #[arg(long = "ignore", value_name = "NAME")]
  ignore: Vec<String>,

  /// Files larger than this many bytes are skipped
  #[arg(long, value_name = "BYTES", default_value_t = MAX_OVERLAY_FILE_SIZE)]
  max_size: u64,
}

pub fn cmd_copy(args: CopyArgs, verbose: bool, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let options = CopyOptions {
    verbose,
    ignore_names: args.ignore.clone(),
    max_file_size: args.max_size,
    ..Default::default()
  };

  copy_dirs(&args.sources, &args.dest, &options)
    .with_context(|| format!("Failed to copy into {}", args.dest.display()))?;

  if output.is_json() {
    return print_json(&json!({
      "dest": args.dest,
      "sources": args.sources,
    }));
  }

  print_success(&format!("Copied {} director{}", args.sources.len(), plural(args.sources.len())));
  Summary::new()
    .path("Destination", &args.dest)
    .row("Size limit", format_bytes(args.max_size))
    .row("Duration", format_duration(start.elapsed()))
    .print();
  Ok(())
}

fn plural(count: usize) -> &'static str {
  if count == 1 { "y" } else { "ies" }
}
