//! Reactive store.
//!
//! Holds the current [`Snapshot`] of both collections and notifies
//! subscribers, synchronously and in registration order, on every publish.

mod snapshot;

pub use snapshot::Snapshot;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tracing::debug;

use crate::cart::CartLine;
use crate::catalog::ProductId;
use crate::wishlist::WishlistItem;

type Listener = Arc<dyn Fn(&Snapshot) + Send + Sync>;

#[derive(Default)]
struct Inner {
  snapshot: Mutex<Arc<Snapshot>>,
  listeners: Mutex<Vec<(u64, Listener)>>,
  next_id: AtomicU64,
}

/// Cloneable handle to the process-wide snapshot container.
#[derive(Clone, Default)]
pub struct ReactiveStore {
  inner: Arc<Inner>,
}

impl std::fmt::Debug for ReactiveStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ReactiveStore")
      .field("snapshot", &self.snapshot())
      .field("subscribers", &self.subscriber_count())
      .finish()
  }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
  mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ReactiveStore {
  pub fn new(initial: Snapshot) -> Self {
    let store = Self::default();
    store.reset(initial);
    store
  }

  /// The current snapshot.
  pub fn snapshot(&self) -> Arc<Snapshot> {
    Arc::clone(&lock(&self.inner.snapshot))
  }

  /// Register a listener invoked with every subsequently published snapshot.
  pub fn subscribe<F>(&self, listener: F) -> Subscription
  where
    F: Fn(&Snapshot) + Send + Sync + 'static,
  {
    let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
    lock(&self.inner.listeners).push((id, Arc::new(listener)));
    debug!(subscription = id, "subscriber registered");
    Subscription {
      id,
      store: Arc::downgrade(&self.inner),
      active: AtomicBool::new(true),
    }
  }

  pub fn subscriber_count(&self) -> usize {
    lock(&self.inner.listeners).len()
  }

  /// Replace the current snapshot and notify every subscriber.
  pub fn publish(&self, snapshot: Snapshot) {
    let snapshot = Arc::new(snapshot);
    *lock(&self.inner.snapshot) = Arc::clone(&snapshot);
    self.notify(&snapshot);
  }

  /// Replace the current snapshot without notifying anyone.
  pub(crate) fn reset(&self, snapshot: Snapshot) {
    *lock(&self.inner.snapshot) = Arc::new(snapshot);
  }

  pub(crate) fn publish_cart(&self, cart: &[CartLine]) {
    let next = {
      let mut current = lock(&self.inner.snapshot);
      let mut next = Snapshot::clone(&current);
      next.cart = cart.to_vec();
      let next = Arc::new(next);
      *current = Arc::clone(&next);
      next
    };
    self.notify(&next);
  }

  pub(crate) fn publish_wishlist(&self, ids: &[ProductId], items: Vec<WishlistItem>) {
    let next = {
      let mut current = lock(&self.inner.snapshot);
      let mut next = Snapshot::clone(&current);
      next.wishlist = ids.to_vec();
      next.wishlist_items = items;
      let next = Arc::new(next);
      *current = Arc::clone(&next);
      next
    };
    self.notify(&next);
  }

  fn notify(&self, snapshot: &Snapshot) {
    // Listeners may subscribe or unsubscribe from inside the callback.
    let listeners: Vec<Listener> = lock(&self.inner.listeners)
      .iter()
      .map(|(_, listener)| Arc::clone(listener))
      .collect();
    debug!(subscribers = listeners.len(), "publishing snapshot");
    for listener in listeners {
      listener(snapshot);
    }
  }
}

/// Handle returned by [`ReactiveStore::subscribe`].
///
/// Dropping the handle does not unsubscribe.
#[derive(Debug)]
pub struct Subscription {
  id: u64,
  store: Weak<Inner>,
  active: AtomicBool,
}

impl Subscription {
  /// Stop further notifications. Safe to call more than once.
  pub fn unsubscribe(&self) {
    if !self.active.swap(false, Ordering::AcqRel) {
      return;
    }
    if let Some(inner) = self.store.upgrade() {
      lock(&inner.listeners).retain(|(id, _)| *id != self.id);
      debug!(subscription = self.id, "subscriber removed");
    }
  }

  pub fn is_active(&self) -> bool {
    self.active.load(Ordering::Acquire)
  }
}
