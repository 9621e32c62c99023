//! CLI integration tests for cartsync.

mod cart_tests;
mod common;
mod wishlist_tests;
