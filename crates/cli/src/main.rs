mod cmd;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{BuildArgs, CopyArgs, InfoArgs};
use output::{OutputFormat, print_error};

/// trimbuild - build Go programs from rewritten source trees
#[derive(Parser)]
#[command(name = "trimbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Log every command before it runs
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long = "output-format", global = true, value_enum, default_value_t)]
  output_format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build the rewritten copy of a project with trim-path rules
  Build(BuildArgs),

  /// Mirror directories under a destination root
  Copy(CopyArgs),

  /// Show the rewrite root and Go toolchain
  Info(InfoArgs),
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "info" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Build(args) => cmd::cmd_build(args, cli.verbose, cli.output_format),
    Commands::Copy(args) => cmd::cmd_copy(args, cli.verbose, cli.output_format),
    Commands::Info(args) => cmd::cmd_info(args, cli.verbose, cli.output_format),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
