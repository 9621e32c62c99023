use crate::consts::APP_NAME;
use std::path::PathBuf;

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> PathBuf {
  let userprofile = std::env::var("USERPROFILE").unwrap_or_default();
  PathBuf::from(userprofile)
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> PathBuf {
  let home = std::env::var("HOME").unwrap_or_default();
  PathBuf::from(home)
}

/// Returns the directory for configuration files for the application
#[cfg(windows)]
pub fn config_dir() -> PathBuf {
  let appdata = std::env::var("APPDATA").unwrap_or_default();
  PathBuf::from(appdata).join(APP_NAME)
}

/// Returns the directory for configuration files for the application
#[cfg(not(windows))]
pub fn config_dir() -> PathBuf {
  let config_home = std::env::var("XDG_CONFIG_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join(".config"));
  config_home.join(APP_NAME)
}

/// Returns the directory for data files for the application.
///
/// `CARTSYNC_DATA_DIR` takes precedence over the platform default.
pub fn data_dir() -> PathBuf {
  if let Ok(dir) = std::env::var("CARTSYNC_DATA_DIR") {
    return PathBuf::from(dir);
  }
  default_data_dir()
}

#[cfg(windows)]
fn default_data_dir() -> PathBuf {
  let appdata = std::env::var("APPDATA").unwrap_or_default();
  PathBuf::from(appdata).join(APP_NAME)
}

#[cfg(not(windows))]
fn default_data_dir() -> PathBuf {
  let data_home = std::env::var("XDG_DATA_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join(".local").join("share"));
  data_home.join(APP_NAME)
}

/// Directory holding the persisted slot files.
pub fn slots_dir() -> PathBuf {
  data_dir().join("slots")
}

/// Default location of the product catalog.
///
/// `CARTSYNC_CATALOG` takes precedence over `<config_dir>/catalog.json`.
pub fn catalog_path() -> PathBuf {
  if let Ok(path) = std::env::var("CARTSYNC_CATALOG") {
    return PathBuf::from(path);
  }
  config_dir().join("catalog.json")
}
