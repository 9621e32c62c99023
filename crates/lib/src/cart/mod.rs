//! Cart collection manager.
//!
//! Cart lines are keyed by product identity: adding a product that is already
//! in the cart grows its quantity, and removal by identity uses the same key.

mod manager;
mod types;

pub use manager::Cart;
pub use types::{CartLine, LineTemplate, clamp_quantity};
