//! Durable slot storage.
//!
//! A slot is a named, expiring JSON record holding one serialized collection.
//! Reads fail open: a missing, expired, oversized or unparsable slot reads back
//! as the empty collection.

mod binding;
mod storage;
mod types;

pub use binding::SlotBinding;
pub use storage::SlotStore;
pub use types::{PersistedSlot, SLOT_VERSION, SlotCollection, SlotError, unix_now};
pub(crate) use types::decode_entries;
