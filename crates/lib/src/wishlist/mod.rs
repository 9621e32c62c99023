//! Wishlist collection manager.
//!
//! The wishlist persists only product indices. Display data is resolved
//! through the catalog on every read, so catalog changes show up without
//! rewriting the slot.

mod manager;

pub use crate::catalog::ProductId;
pub use manager::{Wishlist, WishlistItem};

use serde_json::Value;

use crate::consts::WISHLIST_SLOT;
use crate::slot::{SlotCollection, decode_entries};

impl SlotCollection for Vec<ProductId> {
  /// Drops entries that are not non-negative integers and collapses duplicates,
  /// keeping first-seen order.
  fn from_value(value: Value) -> Self {
    let mut ids: Vec<ProductId> = Vec::new();
    for id in decode_entries::<ProductId>(WISHLIST_SLOT, value) {
      if !ids.contains(&id) {
        ids.push(id);
      }
    }
    ids
  }
}
