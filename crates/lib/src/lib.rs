//! cartsync-lib: persisted collection synchronizer for a storefront.
//!
//! Keeps the shopping cart and wishlist consistent between an in-memory
//! reactive store and durable, expiring slots on disk:
//! - `slot`: size-bounded, time-expiring JSON slots that fail open to empty
//! - `catalog`: read-only, index-addressed product lookup
//! - `cart` / `wishlist`: collection managers that persist and publish every mutation
//! - `store`: subscribable snapshot container
//! - `storefront`: the context object wiring them together

pub mod cart;
pub mod catalog;
pub mod config;
pub mod consts;
pub mod platform;
pub mod slot;
pub mod store;
pub mod storefront;
pub mod wishlist;

pub use storefront::Storefront;
