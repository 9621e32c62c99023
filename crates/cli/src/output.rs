//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages, prices, expiry times and Unicode symbols.

use std::time::Duration;

use anyhow::Context;
use cartsync_lib::cart::CartLine;
use cartsync_lib::wishlist::WishlistItem;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

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
  pub const HEART: &str = "♥";
}

pub fn format_price(amount: f64) -> String {
  format!("${:.2}", amount)
}

pub fn format_bytes(bytes: u64) -> String {
  const KB: u64 = 1024;

  if bytes >= KB {
    format!("{:.1} KB", bytes as f64 / KB as f64)
  } else {
    format!("{} B", bytes)
  }
}

/// Human-readable time until `expires_at`, or "expired".
pub fn format_expiry(expires_at: u64, now: u64) -> String {
  if expires_at <= now {
    return "expired".to_string();
  }
  // Whole minutes are enough precision for a multi-day window.
  let remaining = (expires_at - now) / 60 * 60;
  format!("in {}", humantime::format_duration(Duration::from_secs(remaining)))
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

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

pub fn print_cart_line(position: usize, line: &CartLine) {
  let variant = line
    .variant_label
    .as_deref()
    .map(|v| format!(" ({})", v))
    .unwrap_or_default();
  println!(
    "  [{}] #{} {}{} {} x {} = {}",
    position,
    line.product_id,
    line.name,
    variant.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    line.quantity,
    format_price(line.unit_price),
    format_price(line.subtotal()).if_supports_color(Stream::Stdout, |s| s.bold()),
  );
}

pub fn print_wishlist_item(item: &WishlistItem) {
  println!(
    "  {} #{} {} {}",
    symbols::HEART.if_supports_color(Stream::Stdout, |s| s.red()),
    item.product_id,
    item.product.name,
    item.product.price_formatted.if_supports_color(Stream::Stdout, |s| s.dimmed()),
  );
}
