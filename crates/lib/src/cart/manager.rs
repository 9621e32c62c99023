use tracing::debug;

use crate::catalog::ProductId;
use crate::slot::SlotBinding;
use crate::store::ReactiveStore;

use super::types::{CartLine, LineTemplate, clamp_quantity};

/// Owns the canonical list of cart lines.
///
/// Every effective mutation runs the same sequence: change the in-memory list,
/// write it to the cart slot, publish it to the reactive store. Calls that
/// change nothing (unknown identity, position out of range) skip the write and
/// the publish.
#[derive(Debug)]
pub struct Cart {
  lines: Vec<CartLine>,
  slot: SlotBinding,
  store: ReactiveStore,
}

impl Cart {
  /// Load the cart from its slot. Damaged or expired slots start an empty cart.
  pub fn load(slot: SlotBinding, store: ReactiveStore) -> Self {
    let lines: Vec<CartLine> = slot.load();
    debug!(lines = lines.len(), "cart loaded");
    Self { lines, slot, store }
  }

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  pub fn get(&self, position: usize) -> Option<&CartLine> {
    self.lines.get(position)
  }

  pub fn find(&self, product_id: ProductId) -> Option<&CartLine> {
    self.lines.iter().find(|l| l.product_id == product_id)
  }

  /// Number of distinct lines.
  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Total number of units across all lines.
  pub fn count(&self) -> u64 {
    self.lines.iter().map(|l| u64::from(l.quantity)).sum()
  }

  /// Sum of `unit_price * quantity` over all lines.
  pub fn total(&self) -> f64 {
    self.lines.iter().map(CartLine::subtotal).sum()
  }

  /// Add `quantity` units of a product, returning the line's new quantity.
  ///
  /// An existing line for the same product keeps its captured display fields
  /// and only grows. Quantities below 1 are treated as 1.
  pub fn add(&mut self, product_id: ProductId, template: LineTemplate, quantity: i64) -> u32 {
    let delta = clamp_quantity(quantity);
    let quantity = match self.lines.iter_mut().find(|l| l.product_id == product_id) {
      Some(line) => {
        line.quantity = line.quantity.saturating_add(delta);
        line.quantity
      }
      None => {
        self.lines.push(CartLine::new(product_id, template, delta));
        delta
      }
    };
    debug!(product_id, quantity, "cart line added");
    self.commit();
    quantity
  }

  /// Remove the line for a product. Returns `false` if it was not in the cart.
  pub fn remove(&mut self, product_id: ProductId) -> bool {
    let Some(position) = self.lines.iter().position(|l| l.product_id == product_id) else {
      return false;
    };
    self.lines.remove(position);
    debug!(product_id, "cart line removed");
    self.commit();
    true
  }

  /// Remove the line at a list position, returning it.
  pub fn remove_at(&mut self, position: usize) -> Option<CartLine> {
    if position >= self.lines.len() {
      return None;
    }
    let line = self.lines.remove(position);
    debug!(position, product_id = line.product_id, "cart line removed");
    self.commit();
    Some(line)
  }

  /// Set the quantity of the line at `position`, clamped to at least 1.
  ///
  /// Returns `false` if the position is out of range.
  pub fn update_quantity(&mut self, position: usize, quantity: i64) -> bool {
    let Some(line) = self.lines.get_mut(position) else {
      return false;
    };
    line.quantity = clamp_quantity(quantity);
    debug!(position, quantity = line.quantity, "cart quantity updated");
    self.commit();
    true
  }

  /// Empty the cart and overwrite its slot with an empty list.
  pub fn clear(&mut self) {
    self.lines.clear();
    self.slot.clear::<Vec<CartLine>>();
    debug!("cart cleared");
    self.store.publish_cart(&self.lines);
  }

  /// Re-read the slot without writing to it, publishing if it differs.
  pub fn reload(&mut self) -> bool {
    let lines: Vec<CartLine> = self.slot.load();
    if lines == self.lines {
      return false;
    }
    debug!(lines = lines.len(), "cart changed on disk");
    self.lines = lines;
    self.store.publish_cart(&self.lines);
    true
  }

  fn commit(&self) {
    self.slot.persist(&self.lines);
    self.store.publish_cart(&self.lines);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::consts::CART_SLOT;
  use crate::slot::SlotStore;
  use std::sync::{Arc, Mutex};
  use tempfile::TempDir;

  struct Fixture {
    _temp: TempDir,
    slots: SlotStore,
    store: ReactiveStore,
    cart: Cart,
  }

  fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let slots = SlotStore::new(temp.path().to_path_buf(), 4096);
    let store = ReactiveStore::default();
    let cart = Cart::load(SlotBinding::new(slots.clone(), CART_SLOT, 7), store.clone());
    Fixture {
      _temp: temp,
      slots,
      store,
      cart,
    }
  }

  fn shirt() -> LineTemplate {
    LineTemplate {
      name: "Shirt".to_string(),
      unit_price: 20.0,
      image: "shirt.png".to_string(),
      variant_label: None,
    }
  }

  fn template(name: &str, price: f64) -> LineTemplate {
    LineTemplate {
      name: name.to_string(),
      unit_price: price,
      ..LineTemplate::default()
    }
  }

  fn persisted(f: &Fixture) -> Vec<CartLine> {
    f.slots.read(CART_SLOT)
  }

  #[test]
  fn checkout_scenario() {
    let mut f = fixture();
    assert_eq!(f.cart.total(), 0.0);

    f.cart.add(5, shirt(), 1);
    assert_eq!(f.cart.total(), 20.0);

    f.cart.add(5, shirt(), 2);
    assert_eq!(f.cart.len(), 1);
    assert_eq!(f.cart.lines()[0].quantity, 3);
    assert_eq!(f.cart.total(), 60.0);

    f.cart.clear();
    assert_eq!(f.cart.total(), 0.0);
    assert!(persisted(&f).is_empty());
    let slot = f.slots.try_read_slot(CART_SLOT).unwrap().unwrap();
    assert_eq!(slot.value, serde_json::json!([]));
  }

  #[test]
  fn repeated_add_is_additive() {
    let mut f = fixture();
    f.cart.add(1, shirt(), 2);
    let quantity = f.cart.add(1, shirt(), 3);

    assert_eq!(quantity, 5);
    assert_eq!(f.cart.len(), 1);
    assert_eq!(persisted(&f)[0].quantity, 5);
  }

  #[test]
  fn repeated_add_keeps_captured_fields() {
    let mut f = fixture();
    f.cart.add(1, template("Old name", 10.0), 1);
    f.cart.add(1, template("New name", 99.0), 1);

    let line = f.cart.find(1).unwrap();
    assert_eq!(line.name, "Old name");
    assert_eq!(line.unit_price, 10.0);
    assert_eq!(line.quantity, 2);
  }

  #[test]
  fn add_clamps_non_positive_quantity() {
    let mut f = fixture();
    assert_eq!(f.cart.add(1, shirt(), 0), 1);
    assert_eq!(f.cart.add(1, shirt(), -5), 2);
  }

  #[test]
  fn remove_by_identity_matches_add_identity() {
    let mut f = fixture();
    f.cart.add(1, template("Same", 1.0), 1);
    f.cart.add(2, template("Same", 1.0), 1);

    assert!(f.cart.remove(1));
    assert_eq!(f.cart.len(), 1);
    assert_eq!(f.cart.lines()[0].product_id, 2);
    assert_eq!(persisted(&f), f.cart.lines());
  }

  #[test]
  fn remove_missing_identity_is_noop() {
    let mut f = fixture();
    f.cart.add(1, shirt(), 1);
    let publishes = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&publishes);
    f.store.subscribe(move |_| *counter.lock().unwrap() += 1);

    assert!(!f.cart.remove(42));
    assert_eq!(f.cart.len(), 1);
    assert_eq!(*publishes.lock().unwrap(), 0);
  }

  #[test]
  fn both_removal_forms_agree() {
    let mut by_id = fixture();
    let mut by_position = fixture();
    for f in [&mut by_id, &mut by_position] {
      f.cart.add(1, template("A", 1.0), 1);
      f.cart.add(2, template("B", 2.0), 2);
      f.cart.add(3, template("C", 3.0), 3);
    }

    by_id.cart.remove(2);
    let removed = by_position.cart.remove_at(1).unwrap();

    assert_eq!(removed.product_id, 2);
    assert_eq!(persisted(&by_id), persisted(&by_position));
  }

  #[test]
  fn remove_at_out_of_range_is_noop() {
    let mut f = fixture();
    f.cart.add(1, shirt(), 1);
    assert!(f.cart.remove_at(1).is_none());
    assert_eq!(f.cart.len(), 1);
  }

  #[test]
  fn update_quantity_clamps_and_bounds_checks() {
    let mut f = fixture();
    f.cart.add(1, shirt(), 4);

    assert!(f.cart.update_quantity(0, 0));
    assert_eq!(f.cart.lines()[0].quantity, 1);

    assert!(f.cart.update_quantity(0, 6));
    assert_eq!(persisted(&f)[0].quantity, 6);

    assert!(!f.cart.update_quantity(3, 2));
    assert_eq!(f.cart.lines()[0].quantity, 6);
  }

  #[test]
  fn count_sums_units() {
    let mut f = fixture();
    f.cart.add(1, shirt(), 2);
    f.cart.add(2, shirt(), 3);
    assert_eq!(f.cart.count(), 5);
    assert_eq!(f.cart.len(), 2);
  }

  #[test]
  fn mutations_publish_to_store() {
    let mut f = fixture();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    f.store.subscribe(move |snapshot| sink.lock().unwrap().push(snapshot.cart_total()));

    f.cart.add(1, shirt(), 1);
    f.cart.update_quantity(0, 3);
    f.cart.remove_at(0);

    assert_eq!(*seen.lock().unwrap(), vec![20.0, 60.0, 0.0]);
    assert!(f.store.snapshot().cart.is_empty());
  }

  #[test]
  fn state_survives_reload() {
    let mut f = fixture();
    f.cart.add(7, shirt(), 2);

    let reloaded = Cart::load(SlotBinding::new(f.slots.clone(), CART_SLOT, 7), ReactiveStore::default());
    assert_eq!(reloaded.lines(), f.cart.lines());
  }

  #[test]
  fn reload_picks_up_external_writes_without_writing() {
    let mut f = fixture();
    f.cart.add(1, shirt(), 1);

    let mut other = Cart::load(SlotBinding::new(f.slots.clone(), CART_SLOT, 7), ReactiveStore::default());
    other.add(2, shirt(), 1);

    let before = f.slots.try_read_slot(CART_SLOT).unwrap().unwrap();
    assert!(f.cart.reload());
    assert_eq!(f.cart.len(), 2);
    assert_eq!(f.store.snapshot().cart.len(), 2);
    assert!(!f.cart.reload());
    assert_eq!(f.slots.try_read_slot(CART_SLOT).unwrap().unwrap(), before);
  }

  #[test]
  fn persistence_failure_keeps_in_memory_state() {
    let temp = TempDir::new().unwrap();
    let slots = SlotStore::new(temp.path().to_path_buf(), 64);
    let mut cart = Cart::load(SlotBinding::new(slots.clone(), CART_SLOT, 7), ReactiveStore::default());

    cart.add(1, template("A very long product name that will not fit", 1.0), 1);

    assert_eq!(cart.len(), 1);
    assert!(slots.read::<Vec<CartLine>>(CART_SLOT).is_empty());
  }
}
