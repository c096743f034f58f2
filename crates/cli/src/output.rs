//! Terminal rendering for `broc plan` and `broc build`.
//!
//! Status lines carry a marker per [`Status`]; success and info go to stdout,
//! warnings and errors to stderr. Plans can also be emitted as JSON.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

/// How `broc plan` renders its result.
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

/// Characters of a fingerprint shown in headings.
const HASH_DISPLAY_LEN: usize = 12;

pub mod symbols {
  pub const ARROW: &str = "→";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
  Success,
  Error,
  Warning,
  Info,
}

impl Status {
  fn marker(self) -> &'static str {
    match self {
      Status::Success => "✓",
      Status::Error => "✗",
      Status::Warning => "⚠",
      Status::Info => "•",
    }
  }

  fn stream(self) -> Stream {
    match self {
      Status::Success | Status::Info => Stream::Stdout,
      Status::Error | Status::Warning => Stream::Stderr,
    }
  }

  /// Render `message` with its marker. Errors and warnings tint the whole
  /// line, the others only the marker.
  fn line(self, message: &str) -> String {
    let stream = self.stream();
    let marker = self.marker();
    match self {
      Status::Success => format!("{} {}", marker.if_supports_color(stream, |s| s.green()), message),
      Status::Info => format!("{} {}", marker.if_supports_color(stream, |s| s.blue()), message),
      Status::Warning => format!(
        "{} {}",
        marker.if_supports_color(stream, |s| s.yellow()),
        message.if_supports_color(stream, |s| s.yellow())
      ),
      Status::Error => format!(
        "{} {}",
        marker.if_supports_color(stream, |s| s.red()),
        message.if_supports_color(stream, |s| s.red())
      ),
    }
  }
}

fn print_status(status: Status, message: &str) {
  let line = status.line(message);
  match status.stream() {
    Stream::Stderr => eprintln!("{line}"),
    _ => println!("{line}"),
  }
}

pub fn print_success(message: &str) {
  print_status(Status::Success, message);
}

pub fn print_error(message: &str) {
  print_status(Status::Error, message);
}

pub fn print_warning(message: &str) {
  print_status(Status::Warning, message);
}

pub fn print_info(message: &str) {
  print_status(Status::Info, message);
}

/// Indented `label: value` line under a status message.
pub fn print_stat(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize plan to JSON")?;
  println!("{json}");
  Ok(())
}

/// Short form of a plan fingerprint for headings.
pub fn truncate_hash(hash: &str) -> &str {
  hash.get(..HASH_DISPLAY_LEN).unwrap_or(hash)
}

/// `50ms`, `1.50s` or `1m 5s`.
pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  match secs {
    0 => format!("{millis}ms"),
    1..=59 => format!("{}.{:02}s", secs, millis / 10),
    _ => format!("{}m {}s", secs / 60, secs % 60),
  }
}
