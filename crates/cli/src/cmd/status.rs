//! Status command implementation.
//!
//! Displays where the slots live, when they expire, and what they hold.

use std::path::Path;

use anyhow::Result;
use cartsync_lib::consts::{CART_SLOT, WISHLIST_SLOT};
use cartsync_lib::slot::{SlotStore, unix_now};
use serde::Serialize;

use super::open_storefront;
use crate::output::{
  OutputFormat, format_bytes, format_expiry, format_price, print_json, print_stat, print_success, print_warning,
};

#[derive(Debug, Serialize)]
struct SlotStatus {
  name: &'static str,
  path: String,
  exists: bool,
  bytes: u64,
  expires_at: Option<u64>,
  readable: bool,
}

#[derive(Debug, Serialize)]
struct StatusOutput {
  slots_dir: String,
  catalog: String,
  catalog_products: usize,
  ttl_days: u64,
  max_slot_bytes: usize,
  slots: Vec<SlotStatus>,
  cart_lines: usize,
  cart_total: f64,
  wishlist_entries: usize,
}

fn slot_status(slots: &SlotStore, name: &'static str) -> SlotStatus {
  let path = slots.slot_path(name);
  let bytes = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
  let slot = slots.try_read_slot(name);
  SlotStatus {
    name,
    path: path.display().to_string(),
    exists: path.exists(),
    bytes,
    expires_at: slot.as_ref().ok().and_then(|s| s.as_ref().map(|s| s.expires_at)),
    readable: slot.is_ok(),
  }
}

pub fn cmd_status(catalog: Option<&Path>, output: OutputFormat) -> Result<()> {
  let shop = open_storefront(catalog)?;
  let config = shop.config();
  let snapshot = shop.snapshot();

  let status = StatusOutput {
    slots_dir: config.slots_dir.display().to_string(),
    catalog: config.catalog_path.display().to_string(),
    catalog_products: shop.catalog().len(),
    ttl_days: config.ttl_days,
    max_slot_bytes: config.max_slot_bytes,
    slots: vec![
      slot_status(shop.slots(), CART_SLOT),
      slot_status(shop.slots(), WISHLIST_SLOT),
    ],
    cart_lines: snapshot.cart_count(),
    cart_total: snapshot.cart_total(),
    wishlist_entries: snapshot.wishlist.len(),
  };

  if output.is_json() {
    return print_json(&status);
  }

  print_success(&format!("cartsync v{}", env!("CARGO_PKG_VERSION")));
  print_stat("Slots", &status.slots_dir);
  print_stat("Catalog", &format!("{} ({} products)", status.catalog, status.catalog_products));
  print_stat("Expiry window", &format!("{} day(s)", status.ttl_days));
  println!();

  let now = unix_now();
  for slot in &status.slots {
    let state = match (slot.exists, slot.readable, slot.expires_at) {
      (false, _, _) => "not written".to_string(),
      (true, false, _) => {
        print_warning(&format!("{} is unreadable and will be treated as empty", slot.path));
        "unreadable".to_string()
      }
      (true, true, Some(expires_at)) => format!("{}, expires {}", format_bytes(slot.bytes), format_expiry(expires_at, now)),
      (true, true, None) => format_bytes(slot.bytes),
    };
    print_stat(slot.name, &state);
  }
  println!();

  print_stat("Cart", &format!("{} line(s), {}", status.cart_lines, format_price(status.cart_total)));
  print_stat("Wishlist", &format!("{} product(s)", status.wishlist_entries));
  Ok(())
}
