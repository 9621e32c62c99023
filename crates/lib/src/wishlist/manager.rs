use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{Catalog, Product, ProductId};
use crate::slot::SlotBinding;
use crate::store::ReactiveStore;

/// A wishlist entry resolved through the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WishlistItem {
  pub product_id: ProductId,
  pub product: Product,
}

/// Owns the set of wishlisted product indices.
///
/// Set semantics with stable insertion order. Confirmation before removal is
/// the caller's concern; every call here takes effect immediately.
#[derive(Debug)]
pub struct Wishlist {
  ids: Vec<ProductId>,
  catalog: Arc<Catalog>,
  slot: SlotBinding,
  store: ReactiveStore,
}

impl Wishlist {
  pub fn load(catalog: Arc<Catalog>, slot: SlotBinding, store: ReactiveStore) -> Self {
    let ids: Vec<ProductId> = slot.load();
    debug!(entries = ids.len(), "wishlist loaded");
    Self {
      ids,
      catalog,
      slot,
      store,
    }
  }

  /// Stored indices, including any the catalog no longer resolves.
  pub fn ids(&self) -> &[ProductId] {
    &self.ids
  }

  pub fn len(&self) -> usize {
    self.ids.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ids.is_empty()
  }

  pub fn contains(&self, id: ProductId) -> bool {
    self.ids.contains(&id)
  }

  /// Add a product. Returns `true` if it was inserted.
  ///
  /// Already-present products and indices outside the catalog are no-ops.
  pub fn add(&mut self, id: ProductId) -> bool {
    if self.contains(id) {
      return false;
    }
    if self.catalog.get(id).is_none() {
      warn!(product_id = id, catalog_len = self.catalog.len(), "ignoring wishlist add outside the catalog");
      return false;
    }
    self.ids.push(id);
    debug!(product_id = id, "wishlist entry added");
    self.commit();
    true
  }

  /// Remove a product. Returns `true` if it was present.
  pub fn remove(&mut self, id: ProductId) -> bool {
    let Some(position) = self.ids.iter().position(|&i| i == id) else {
      return false;
    };
    self.ids.remove(position);
    debug!(product_id = id, "wishlist entry removed");
    self.commit();
    true
  }

  /// Flip membership, returning whether the product is wishlisted afterwards.
  pub fn toggle(&mut self, id: ProductId) -> bool {
    if self.contains(id) {
      self.remove(id);
      false
    } else {
      self.add(id)
    }
  }

  /// Resolve the stored indices through the catalog, skipping stale ones.
  pub fn materialize(&self) -> Vec<WishlistItem> {
    self
      .ids
      .iter()
      .filter_map(|&id| match self.catalog.get(id) {
        Some(product) => Some(WishlistItem {
          product_id: id,
          product: product.clone(),
        }),
        None => {
          warn!(product_id = id, "skipping stale wishlist index");
          None
        }
      })
      .collect()
  }

  /// Empty the wishlist and overwrite its slot with an empty list.
  pub fn clear_all(&mut self) {
    self.ids.clear();
    self.slot.clear::<Vec<ProductId>>();
    debug!("wishlist cleared");
    self.publish();
  }

  /// Re-read the slot without writing to it, publishing if it differs.
  pub fn reload(&mut self) -> bool {
    let ids: Vec<ProductId> = self.slot.load();
    if ids == self.ids {
      return false;
    }
    debug!(entries = ids.len(), "wishlist changed on disk");
    self.ids = ids;
    self.publish();
    true
  }

  fn commit(&self) {
    self.slot.persist(&self.ids);
    self.publish();
  }

  fn publish(&self) {
    self.store.publish_wishlist(&self.ids, self.materialize());
  }
}
