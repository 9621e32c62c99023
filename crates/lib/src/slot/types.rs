use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Current envelope version. Bare arrays written before envelopes existed read as version 0.
pub const SLOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SlotError {
  #[error("failed to create slot directory: {0}")]
  CreateDir(#[source] io::Error),

  #[error("failed to read slot: {0}")]
  Read(#[source] io::Error),

  #[error("failed to write slot: {0}")]
  Write(#[source] io::Error),

  #[error("failed to parse slot: {0}")]
  Parse(#[source] serde_json::Error),

  #[error("failed to serialize slot: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("slot payload is {size} bytes, limit is {limit}")]
  TooLarge { size: usize, limit: usize },

  #[error("unsupported slot version: {0}")]
  UnsupportedVersion(u32),

  #[error("slot file holds {found:?}, expected {expected:?}")]
  NameMismatch { expected: String, found: String },
}

/// On-disk envelope of a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSlot {
  pub version: u32,
  pub name: String,
  /// Unix seconds after which the slot reads as absent.
  pub expires_at: u64,
  pub value: Value,
}

impl PersistedSlot {
  pub fn is_expired(&self, now: u64) -> bool {
    now >= self.expires_at
  }
}

/// A collection that can live in a slot.
///
/// Decoding is lenient: entries that do not parse are dropped instead of
/// failing the whole collection.
pub trait SlotCollection: Serialize + Default {
  fn from_value(value: Value) -> Self;
}

/// Decode every element of a JSON array independently, skipping the ones that fail.
///
/// Non-array values decode to an empty list.
pub(crate) fn decode_entries<T: DeserializeOwned>(slot: &str, value: Value) -> Vec<T> {
  let Value::Array(items) = value else {
    tracing::warn!(slot, "slot value is not an array, discarding");
    return Vec::new();
  };

  items
    .into_iter()
    .enumerate()
    .filter_map(|(position, item)| match serde_json::from_value(item) {
      Ok(entry) => Some(entry),
      Err(e) => {
        tracing::warn!(slot, position, error = %e, "dropping malformed slot entry");
        None
      }
    })
    .collect()
}

/// Current wall-clock time in unix seconds.
pub fn unix_now() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .unwrap_or_default()
    .as_secs()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn expiry_is_inclusive_of_the_deadline() {
    let slot = PersistedSlot {
      version: SLOT_VERSION,
      name: "cartItems".into(),
      expires_at: 100,
      value: json!([]),
    };
    assert!(!slot.is_expired(99));
    assert!(slot.is_expired(100));
    assert!(slot.is_expired(101));
  }

  #[test]
  fn decode_entries_skips_bad_items() {
    let decoded: Vec<u32> = decode_entries("wishlist", json!([1, "two", 3, -4, null]));
    assert_eq!(decoded, vec![1, 3]);
  }

  #[test]
  fn decode_entries_rejects_non_array() {
    let decoded: Vec<u32> = decode_entries("wishlist", json!({"items": [1, 2]}));
    assert!(decoded.is_empty());
  }
}
