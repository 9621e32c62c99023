//! Slot storage on disk.
//!
//! # Storage Layout
//!
//! ```text
//! {data_dir}/slots/
//! ├── cartItems.json      # PersistedSlot envelope holding cart lines
//! └── wishlist.json       # PersistedSlot envelope holding product indices
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::Config;
use crate::consts::{DEFAULT_TTL_DAYS, SECONDS_PER_DAY};

use super::types::{PersistedSlot, SLOT_VERSION, SlotCollection, SlotError, unix_now};

/// Reads and writes named slots under a base directory.
///
/// Each write goes through its own temp file in the slot directory and is
/// renamed into place, so readers only ever see a whole envelope, and
/// concurrent writers to one slot resolve to the last rename.
#[derive(Debug, Clone)]
pub struct SlotStore {
  base_path: PathBuf,
  max_bytes: usize,
  clock: fn() -> u64,
}

impl SlotStore {
  pub fn new(base_path: PathBuf, max_bytes: usize) -> Self {
    Self {
      base_path,
      max_bytes,
      clock: unix_now,
    }
  }

  pub fn from_config(config: &Config) -> Self {
    Self::new(config.slots_dir.clone(), config.max_slot_bytes)
  }

  /// Replace the wall clock, used to exercise expiry.
  pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
    self.clock = clock;
    self
  }

  pub fn base_path(&self) -> &Path {
    &self.base_path
  }

  pub fn max_bytes(&self) -> usize {
    self.max_bytes
  }

  /// Path of the file backing a slot.
  pub fn slot_path(&self, name: &str) -> PathBuf {
    self.base_path.join(format!("{}.json", name))
  }

  fn ensure_dir(&self) -> Result<(), SlotError> {
    fs::create_dir_all(&self.base_path).map_err(SlotError::CreateDir)
  }

  /// Load the raw envelope of a slot, expired or not.
  ///
  /// Returns `Ok(None)` if the slot has never been written.
  pub fn try_read_slot(&self, name: &str) -> Result<Option<PersistedSlot>, SlotError> {
    let path = self.slot_path(name);

    let content = match fs::read_to_string(&path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(SlotError::Read(e)),
    };

    if content.len() > self.max_bytes {
      return Err(SlotError::TooLarge {
        size: content.len(),
        limit: self.max_bytes,
      });
    }

    let raw: Value = serde_json::from_str(&content).map_err(SlotError::Parse)?;

    // Bare arrays predate the envelope; their expiry runs from the file's mtime.
    if raw.is_array() {
      let written_at = modified_secs(&path).map_err(SlotError::Read)?;
      return Ok(Some(PersistedSlot {
        version: 0,
        name: name.to_string(),
        expires_at: written_at + DEFAULT_TTL_DAYS * SECONDS_PER_DAY,
        value: raw,
      }));
    }

    let slot: PersistedSlot = serde_json::from_value(raw).map_err(SlotError::Parse)?;

    if slot.version > SLOT_VERSION {
      return Err(SlotError::UnsupportedVersion(slot.version));
    }

    if slot.name != name {
      return Err(SlotError::NameMismatch {
        expected: name.to_string(),
        found: slot.name,
      });
    }

    Ok(Some(slot))
  }

  /// Load a collection, distinguishing absence from failure.
  ///
  /// An expired slot is reported as `Ok(None)`.
  pub fn try_read<T: SlotCollection>(&self, name: &str) -> Result<Option<T>, SlotError> {
    let Some(slot) = self.try_read_slot(name)? else {
      return Ok(None);
    };

    if slot.is_expired((self.clock)()) {
      warn!(slot = name, expires_at = slot.expires_at, "discarding expired slot");
      return Ok(None);
    }

    Ok(Some(T::from_value(slot.value)))
  }

  /// Load a collection, falling back to the empty collection on any problem.
  pub fn read<T: SlotCollection>(&self, name: &str) -> T {
    match self.try_read(name) {
      Ok(Some(value)) => value,
      Ok(None) => T::default(),
      Err(e) => {
        warn!(slot = name, error = %e, "discarding unreadable slot");
        T::default()
      }
    }
  }

  /// Overwrite a slot, resetting its expiry to `now + ttl_days`.
  ///
  /// A payload above the size limit is rejected and the existing slot file is
  /// removed, so the slot reads as absent rather than stale.
  pub fn write<T: SlotCollection>(&self, name: &str, value: &T, ttl_days: u64) -> Result<(), SlotError> {
    let slot = PersistedSlot {
      version: SLOT_VERSION,
      name: name.to_string(),
      expires_at: (self.clock)().saturating_add(ttl_days.saturating_mul(SECONDS_PER_DAY)),
      value: serde_json::to_value(value).map_err(SlotError::Serialize)?,
    };
    let content = serde_json::to_string(&slot).map_err(SlotError::Serialize)?;

    if content.len() > self.max_bytes {
      self.remove(name)?;
      return Err(SlotError::TooLarge {
        size: content.len(),
        limit: self.max_bytes,
      });
    }

    self.ensure_dir()?;

    // The temp file is unlinked on drop if anything below fails.
    let mut temp = NamedTempFile::new_in(&self.base_path).map_err(SlotError::Write)?;
    temp.write_all(content.as_bytes()).map_err(SlotError::Write)?;
    temp.persist(self.slot_path(name)).map_err(|e| SlotError::Write(e.error))?;

    debug!(slot = name, bytes = content.len(), expires_at = slot.expires_at, "slot written");
    Ok(())
  }

  /// Overwrite a slot with the empty collection.
  pub fn clear<T: SlotCollection>(&self, name: &str, ttl_days: u64) -> Result<(), SlotError> {
    self.write(name, &T::default(), ttl_days)
  }

  /// Delete a slot file. Missing files are not an error.
  pub fn remove(&self, name: &str) -> Result<(), SlotError> {
    match fs::remove_file(self.slot_path(name)) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(SlotError::Write(e)),
    }
  }
}

fn modified_secs(path: &Path) -> io::Result<u64> {
  let modified = fs::metadata(path)?.modified()?;
  Ok(modified.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs())
}
