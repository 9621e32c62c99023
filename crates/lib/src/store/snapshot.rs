use serde::Serialize;

use crate::cart::CartLine;
use crate::catalog::ProductId;
use crate::wishlist::WishlistItem;

/// Point-in-time copy of both collections as views see them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
  pub cart: Vec<CartLine>,
  pub wishlist: Vec<ProductId>,
  /// Wishlist entries resolved through the catalog; stale indices are absent.
  pub wishlist_items: Vec<WishlistItem>,
}

impl Snapshot {
  pub fn cart_total(&self) -> f64 {
    self.cart.iter().map(CartLine::subtotal).sum()
  }

  /// Number of distinct lines in the cart.
  pub fn cart_count(&self) -> usize {
    self.cart.len()
  }

  pub fn wishlist_contains(&self, id: ProductId) -> bool {
    self.wishlist.contains(&id)
  }
}
