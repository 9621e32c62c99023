//! The process-wide synchronizer context.
//!
//! A [`Storefront`] is constructed once at startup and owned by whatever owns
//! the view tree. It wires the slot store, the catalog, both collection
//! managers and the reactive store together.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cart::Cart;
use crate::catalog::{Catalog, ProductId};
use crate::config::Config;
use crate::consts::{CART_SLOT, WISHLIST_SLOT};
use crate::slot::{SlotBinding, SlotStore};
use crate::store::{ReactiveStore, Snapshot, Subscription};
use crate::wishlist::Wishlist;

#[derive(Debug)]
pub struct Storefront {
  config: Config,
  catalog: Arc<Catalog>,
  slots: SlotStore,
  store: ReactiveStore,
  cart: Cart,
  wishlist: Wishlist,
}

impl Storefront {
  /// Read both slots and expose them as the initial snapshot.
  ///
  /// No subscriber is notified for the initial snapshot.
  pub fn initialize(config: Config, catalog: Catalog) -> Self {
    let catalog = Arc::new(catalog);
    let slots = SlotStore::from_config(&config);
    let store = ReactiveStore::default();

    let cart = Cart::load(SlotBinding::new(slots.clone(), CART_SLOT, config.ttl_days), store.clone());
    let wishlist = Wishlist::load(
      Arc::clone(&catalog),
      SlotBinding::new(slots.clone(), WISHLIST_SLOT, config.ttl_days),
      store.clone(),
    );

    store.reset(Snapshot {
      cart: cart.lines().to_vec(),
      wishlist: wishlist.ids().to_vec(),
      wishlist_items: wishlist.materialize(),
    });

    info!(
      slots = %slots.base_path().display(),
      cart_lines = cart.len(),
      wishlist_entries = wishlist.len(),
      "storefront initialized"
    );

    Self {
      config,
      catalog,
      slots,
      store,
      cart,
      wishlist,
    }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  pub fn slots(&self) -> &SlotStore {
    &self.slots
  }

  pub fn store(&self) -> &ReactiveStore {
    &self.store
  }

  pub fn snapshot(&self) -> Arc<Snapshot> {
    self.store.snapshot()
  }

  pub fn subscribe<F>(&self, listener: F) -> Subscription
  where
    F: Fn(&Snapshot) + Send + Sync + 'static,
  {
    self.store.subscribe(listener)
  }

  pub fn cart(&self) -> &Cart {
    &self.cart
  }

  pub fn cart_mut(&mut self) -> &mut Cart {
    &mut self.cart
  }

  pub fn wishlist(&self) -> &Wishlist {
    &self.wishlist
  }

  pub fn wishlist_mut(&mut self) -> &mut Wishlist {
    &mut self.wishlist
  }

  /// Add one unit of a catalog product to the cart, optionally in a swatch.
  ///
  /// Returns the line's new quantity, or `None` if the index is not in the catalog.
  pub fn add_to_cart(&mut self, id: ProductId, swatch: Option<&str>, quantity: i64) -> Option<u32> {
    let template = self.catalog.get(id)?.line_template(swatch);
    Some(self.cart.add(id, template, quantity))
  }

  /// Copy the product of the cart line at `position` into the wishlist.
  ///
  /// The cart line stays in the cart; only the product identity is
  /// transferred. Returns the product id, or `None` if the position is out of
  /// range or the wishlist would not accept it.
  pub fn save_for_later(&mut self, position: usize) -> Option<ProductId> {
    let id = self.cart.get(position)?.product_id;
    if !self.wishlist.contains(id) && !self.wishlist.add(id) {
      return None;
    }
    debug!(product_id = id, "saved for later");
    Some(id)
  }

  /// Add one unit of a wishlisted product to the cart using its catalog defaults.
  ///
  /// The wishlist entry is kept. Returns `false` if the index is not in the catalog.
  pub fn move_to_cart(&mut self, id: ProductId) -> bool {
    self.add_to_cart(id, None, 1).is_some()
  }

  /// Complete a purchase: the cart is emptied.
  pub fn checkout(&mut self) -> f64 {
    let total = self.cart.total();
    self.cart.clear();
    info!(total, "checkout complete");
    total
  }

  /// Re-read both slots to pick up changes made by another process.
  ///
  /// Never writes. Returns `true` if either collection changed.
  pub fn refresh(&mut self) -> bool {
    let cart_changed = self.cart.reload();
    let wishlist_changed = self.wishlist.reload();
    cart_changed || wishlist_changed
  }
}
