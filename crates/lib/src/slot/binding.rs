use tracing::{debug, warn};

use super::storage::SlotStore;
use super::types::SlotCollection;

/// One named slot of a [`SlotStore`], with the expiry window applied on write.
///
/// Persistence failures are logged and swallowed: the in-memory collection is
/// authoritative and a failed write never fails the mutation that caused it.
#[derive(Debug, Clone)]
pub struct SlotBinding {
  store: SlotStore,
  name: &'static str,
  ttl_days: u64,
}

impl SlotBinding {
  pub fn new(store: SlotStore, name: &'static str, ttl_days: u64) -> Self {
    Self { store, name, ttl_days }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn store(&self) -> &SlotStore {
    &self.store
  }

  pub fn load<T: SlotCollection>(&self) -> T {
    self.store.read(self.name)
  }

  pub fn persist<T: SlotCollection>(&self, value: &T) {
    match self.store.write(self.name, value, self.ttl_days) {
      Ok(()) => debug!(slot = self.name, "persisted"),
      Err(e) => warn!(slot = self.name, error = %e, "failed to persist slot, keeping in-memory state"),
    }
  }

  pub fn clear<T: SlotCollection>(&self) {
    if let Err(e) = self.store.clear::<T>(self.name, self.ttl_days) {
      warn!(slot = self.name, error = %e, "failed to clear slot");
    }
  }
}
