//! Implementation of the `trimbuild build` command.
//!
//! Builds the project's mirror under the rewrite root. The module mapping comes
//! either from `--map`/`--mapping` (written by an external rewrite tool) or from
//! `--overlay`, which copies the project and `--module` directories first.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use serde_json::json;
use tracing::debug;

use trimbuild_lib::build::{BuildOptions, BuildPlan, MirrorRewriter, build, build_rewrite, plan_build};
use trimbuild_lib::consts::{DEFAULT_GO_BINARY, GO_BINARY_ENV, REWRITE_ROOT_ENV};
use trimbuild_lib::trimpath::MappedModules;
use trimbuild_lib::workspace::Workspace;

use crate::output::{OutputFormat, Summary, format_duration, print_info, print_json, print_success, print_trim_rules};

#[derive(Debug, Args)]
pub struct BuildArgs {
  /// Project root (default: current directory)
  #[arg(long, value_name = "DIR")]
  project: Option<PathBuf>,

  /// Disable optimizations and inlining for debuggers
  #[arg(long)]
  debug: bool,

  /// Output binary (default: exec.bin, or debug.bin with --debug, in the project root)
  #[arg(short, long, value_name = "PATH")]
  output: Option<PathBuf>,

  /// Relocated module directory, repeatable
  #[arg(long = "map", value_name = "ORIG=CLEANED", value_parser = parse_mapping)]
  map: Vec<(PathBuf, PathBuf)>,

  /// JSON object of original module directory -> cleaned directory
  #[arg(long, value_name = "FILE")]
  mapping: Option<PathBuf>,

  /// Copy the project into the rewrite root before building
  #[arg(long, conflicts_with_all = ["map", "mapping"])]
  overlay: bool,

  /// Module directory copied alongside the project, repeatable
  #[arg(long = "module", value_name = "DIR", requires = "overlay")]
  modules: Vec<PathBuf>,

  /// Top-level name left out of the overlay, repeatable
  #[arg(long = "ignore", value_name = "NAME", requires = "overlay")]
  ignore: Vec<String>,

  /// Go executable
  #[arg(long, env = GO_BINARY_ENV, default_value = DEFAULT_GO_BINARY)]
  go: String,

  /// Rewrite root (default: <temp dir>/go-rewrite)
  #[arg(long, env = REWRITE_ROOT_ENV, value_name = "DIR")]
  rewrite_root: Option<PathBuf>,

  /// Print the compiler invocation without running it
  #[arg(long)]
  dry_run: bool,

  /// Arguments passed to `go build`
  #[arg(last = true)]
  args: Vec<String>,
}

pub fn cmd_build(args: BuildArgs, verbose: bool, output: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let workspace = args.rewrite_root.clone().map(Workspace::new).unwrap_or_default();

  let options = BuildOptions {
    verbose,
    project_root: args.project.clone().unwrap_or_default(),
    debug: args.debug,
    output: args.output.clone(),
    go_binary: args.go.clone(),
    ..Default::default()
  }
  .with_mapped_modules(load_mapping(&args)?);

  if args.dry_run {
    let plan = plan_build(&args.args, &workspace, &options).context("Failed to plan build")?;
    return print_plan(&plan, output);
  }

  let result = if args.overlay {
    let rewriter = MirrorRewriter {
      verbose,
      ignore_names: args.ignore.clone(),
      modules: args.modules.clone(),
    };
    build_rewrite(&args.args, &rewriter, &workspace, options)
  } else {
    build(&args.args, &workspace, &options)
  }
  .context("Build failed")?;

  if output.is_json() {
    print_json(&result)?;
  } else {
    print_success(&format!("Built {}", result.output.display()));
    Summary::new().row("Duration", format_duration(start.elapsed())).print();
  }

  Ok(())
}

fn load_mapping(args: &BuildArgs) -> Result<MappedModules> {
  let mut mapped = MappedModules::new();

  if let Some(path) = &args.mapping {
    let content =
      std::fs::read_to_string(path).with_context(|| format!("Failed to read mapping file: {}", path.display()))?;
    let from_file: MappedModules = serde_json::from_str(&content)
      .with_context(|| format!("Failed to parse mapping file: {}", path.display()))?;
    mapped.extend(from_file);
  }

  mapped.extend(args.map.iter().cloned());
  debug!(modules = mapped.len(), "loaded module mapping");
  Ok(mapped)
}

fn parse_mapping(value: &str) -> Result<(PathBuf, PathBuf)> {
  let (orig, cleaned) = value
    .split_once('=')
    .ok_or_else(|| anyhow!("expected ORIG=CLEANED, got '{}'", value))?;
  if orig.is_empty() || cleaned.is_empty() {
    return Err(anyhow!("expected ORIG=CLEANED, got '{}'", value));
  }
  Ok((PathBuf::from(orig), PathBuf::from(cleaned)))
}

fn print_plan(plan: &BuildPlan, output: OutputFormat) -> Result<()> {
  if output.is_json() {
    return print_json(&json!({
      "project_root": plan.project_root,
      "output": plan.output,
      "work_root": plan.work_root,
      "trimpath": plan.trim_paths.value(),
      "gcflags": plan.gcflags,
      "program": plan.invocation.program(),
      "args": plan.invocation.get_args().iter().map(|arg| arg.to_string_lossy()).collect::<Vec<_>>(),
      "script": plan.invocation.to_script().render(),
    }));
  }

  print_info("Dry run - nothing was built");
  Summary::new()
    .path("Project", &plan.project_root)
    .path("Work root", &plan.work_root)
    .path("Output", &plan.output)
    .row("Trim rules", plan.trim_paths.len())
    .print();
  print_trim_rules(&plan.trim_paths);
  println!();
  println!("{}", plan.invocation.to_script());
  Ok(())
}
