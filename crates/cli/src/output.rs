//! CLI output formatting utilities.
//!
//! Status lines go through the `print_*` helpers; the facts behind them
//! (paths, sizes, trim rules) are printed as an aligned [`Summary`] or with
//! [`print_trim_rules`].

use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use trimbuild_lib::trimpath::TrimPaths;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

pub fn format_bytes(bytes: u64) -> String {
  const KB: u64 = 1024;
  const MB: u64 = KB * 1024;
  const GB: u64 = MB * 1024;

  if bytes >= GB {
    format!("{:.1} GB", bytes as f64 / GB as f64)
  } else if bytes >= MB {
    format!("{:.1} MB", bytes as f64 / MB as f64)
  } else if bytes >= KB {
    format!("{:.1} KB", bytes as f64 / KB as f64)
  } else {
    format!("{} B", bytes)
  }
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    format!("{}m {}s", mins, remaining_secs)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

/// Labelled values printed as an aligned block under a status line.
#[derive(Debug, Default)]
pub struct Summary {
  rows: Vec<(&'static str, String)>,
}

impl Summary {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn row(mut self, label: &'static str, value: impl Display) -> Self {
    self.rows.push((label, value.to_string()));
    self
  }

  pub fn path(self, label: &'static str, path: &Path) -> Self {
    self.row(label, path.display())
  }

  /// Rows as `(padded label, value)`, labels padded to the widest one.
  fn aligned(&self) -> Vec<(String, &str)> {
    let width = self.rows.iter().map(|(label, _)| label.len() + 1).max().unwrap_or(0);
    self
      .rows
      .iter()
      .map(|(label, value)| (format!("{:<width$}", format!("{}:", label)), value.as_str()))
      .collect()
  }

  pub fn print(&self) {
    for (label, value) in self.aligned() {
      println!("  {} {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
    }
  }
}

/// One `rewritten → original` line per rule, in flag order.
pub fn print_trim_rules(trim_paths: &TrimPaths) {
  for (index, rule) in trim_paths.rules().iter().enumerate() {
    let marker = if index == 0 { "project" } else { "module" };
    println!(
      "    {} {} {} {}",
      rule.from().display(),
      symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
      rule.to().display(),
      format!("({})", marker).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
