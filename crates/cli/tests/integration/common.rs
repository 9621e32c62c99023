//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Isolated test environment.
///
/// Each test gets its own temporary data directory; the catalog comes from
/// the fixtures directory.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Data path holding the slots directory.
  pub fn data_path(&self) -> PathBuf {
    let p = self.temp.path().join("data");
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  pub fn slot_path(&self, name: &str) -> PathBuf {
    self.data_path().join("slots").join(format!("{}.json", name))
  }

  /// Write a raw slot file, bypassing the library.
  pub fn write_slot(&self, name: &str, content: &str) {
    let path = self.slot_path(name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
  }

  /// Read the `value` of a slot envelope.
  pub fn slot_value(&self, name: &str) -> serde_json::Value {
    let content = std::fs::read_to_string(self.slot_path(name)).unwrap();
    let envelope: serde_json::Value = serde_json::from_str(&content).unwrap();
    envelope["value"].clone()
  }

  /// Get a pre-configured Command for the cartsync binary.
  ///
  /// Sets environment variables for isolated testing:
  /// - `CARTSYNC_DATA_DIR`: Isolated data path
  /// - `CARTSYNC_CATALOG`: Fixture catalog
  /// - `CARTSYNC_TTL_DAYS` / `CARTSYNC_MAX_SLOT_BYTES`: cleared
  pub fn cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("cartsync");
    cmd.env("CARTSYNC_DATA_DIR", self.data_path());
    cmd.env("CARTSYNC_CATALOG", fixture_path("catalog.json"));
    cmd.env_remove("CARTSYNC_TTL_DAYS");
    cmd.env_remove("CARTSYNC_MAX_SLOT_BYTES");
    cmd.env_remove("RUST_LOG");
    cmd
  }

  /// Run a command that is expected to succeed.
  pub fn run(&self, args: &[&str]) -> String {
    let output = self.cmd().args(args).output().unwrap();
    assert!(
      output.status.success(),
      "cartsync {:?} failed: {}",
      args,
      String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
  }

  pub fn json(&self, args: &[&str]) -> serde_json::Value {
    serde_json::from_str(&self.run(args)).unwrap()
  }
}
