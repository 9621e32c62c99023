//! Wishlist command integration tests.

use predicates::prelude::*;
use serde_json::json;

use super::common::TestEnv;

#[test]
fn toggle_flips_membership() {
  let env = TestEnv::new();

  env.run(&["wishlist", "toggle", "2"]);
  assert_eq!(env.slot_value("wishlist"), json!([2]));

  env.run(&["wishlist", "toggle", "2", "--yes"]);
  assert_eq!(env.slot_value("wishlist"), json!([]));
}

#[test]
fn add_twice_is_idempotent() {
  let env = TestEnv::new();

  env.run(&["wishlist", "add", "1"]);
  env
    .cmd()
    .args(["wishlist", "add", "1"])
    .assert()
    .success()
    .stdout(predicate::str::contains("already in the wishlist"));

  assert_eq!(env.slot_value("wishlist"), json!([1]));
}

#[test]
fn list_materializes_and_drops_stale_indices() {
  let env = TestEnv::new();
  env.write_slot("wishlist", "[0, 17, 2]");

  let items = env.json(&["wishlist", "list", "-o", "json"]);
  let names: Vec<&str> = items
    .as_array()
    .unwrap()
    .iter()
    .map(|i| i["product"]["name"].as_str().unwrap())
    .collect();
  assert_eq!(names, vec!["Linen Shirt", "Oxford Shirt"]);
}

#[test]
fn clear_requires_confirmation() {
  let env = TestEnv::new();
  env.run(&["wishlist", "add", "0"]);

  env.cmd().args(["wishlist", "clear"]).assert().failure();
  assert_eq!(env.slot_value("wishlist"), json!([0]));

  env.run(&["wishlist", "clear", "--yes"]);
  assert_eq!(env.slot_value("wishlist"), json!([]));
}

#[test]
fn move_to_cart_adds_one_unit() {
  let env = TestEnv::new();
  env.run(&["wishlist", "add", "1"]);

  env.run(&["wishlist", "move-to-cart", "1"]);

  let line = &env.slot_value("cartItems")[0];
  assert_eq!(line["name"], "Wool Socks");
  assert_eq!(line["quantity"], 1);
  assert_eq!(env.slot_value("wishlist"), json!([1]));
}

#[test]
fn search_marks_wishlisted_products() {
  let env = TestEnv::new();
  env.run(&["wishlist", "add", "2"]);

  let hits = env.json(&["search", "shirt", "-o", "json"]);
  assert_eq!(
    hits,
    json!([
      {"index": 0, "name": "Linen Shirt", "price": "$20.00", "wishlisted": false},
      {"index": 2, "name": "Oxford Shirt", "price": "$45.00", "wishlisted": true}
    ])
  );
}
