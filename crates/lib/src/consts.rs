//! Constants shared across cartsync.

pub const APP_NAME: &str = "cartsync";

/// Slot holding the serialized cart lines.
pub const CART_SLOT: &str = "cartItems";

/// Slot holding the serialized wishlist product indices.
pub const WISHLIST_SLOT: &str = "wishlist";

/// Days a slot stays readable after its last write.
pub const DEFAULT_TTL_DAYS: u64 = 7;

/// Upper bound on a serialized slot payload, in bytes.
pub const DEFAULT_MAX_SLOT_BYTES: usize = 4096;

pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
