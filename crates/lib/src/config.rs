//! Runtime configuration for the synchronizer.
//!
//! Values come from built-in defaults, overridden by environment variables:
//!
//! | Variable                  | Field            | Default                          |
//! |---------------------------|------------------|----------------------------------|
//! | `CARTSYNC_DATA_DIR`       | `slots_dir`      | `$XDG_DATA_HOME/cartsync/slots`  |
//! | `CARTSYNC_TTL_DAYS`       | `ttl_days`       | `7`                              |
//! | `CARTSYNC_MAX_SLOT_BYTES` | `max_slot_bytes` | `4096`                           |
//! | `CARTSYNC_CATALOG`        | `catalog_path`   | `$XDG_CONFIG_HOME/cartsync/catalog.json` |

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::consts::{DEFAULT_MAX_SLOT_BYTES, DEFAULT_TTL_DAYS};
use crate::platform::paths::{catalog_path, slots_dir};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid value for {var}: {value:?} ({reason})")]
  InvalidValue {
    var: &'static str,
    value: String,
    reason: String,
  },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Directory the slot files are written to.
  pub slots_dir: PathBuf,
  /// Expiry window applied on every slot write.
  pub ttl_days: u64,
  /// Serialized payloads above this size are treated as absent.
  pub max_slot_bytes: usize,
  /// Product catalog the managers resolve indices against.
  pub catalog_path: PathBuf,
}

impl Config {
  /// Build a configuration rooted at an explicit slots directory, with default limits.
  pub fn new(slots_dir: PathBuf) -> Self {
    Self {
      slots_dir,
      ttl_days: DEFAULT_TTL_DAYS,
      max_slot_bytes: DEFAULT_MAX_SLOT_BYTES,
      catalog_path: catalog_path(),
    }
  }

  /// Resolve the configuration from the environment.
  pub fn from_env() -> Result<Self, ConfigError> {
    let mut config = Self::new(slots_dir());
    if let Some(ttl) = env_number::<u64>("CARTSYNC_TTL_DAYS")? {
      config.ttl_days = ttl;
    }
    if let Some(max) = env_number::<usize>("CARTSYNC_MAX_SLOT_BYTES")? {
      config.max_slot_bytes = max;
    }
    Ok(config)
  }

  pub fn with_catalog_path(mut self, path: PathBuf) -> Self {
    self.catalog_path = path;
    self
  }
}

fn env_number<T>(var: &'static str) -> Result<Option<T>, ConfigError>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match std::env::var(var) {
    Ok(value) => value
      .trim()
      .parse::<T>()
      .map(Some)
      .map_err(|e| ConfigError::InvalidValue {
        var,
        value,
        reason: e.to_string(),
      }),
    Err(_) => Ok(None),
  }
}
