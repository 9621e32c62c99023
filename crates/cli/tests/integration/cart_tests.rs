//! Cart command integration tests.

use predicates::prelude::*;
use serde_json::json;

use super::common::TestEnv;

#[test]
fn add_merges_by_product_and_totals() {
  let env = TestEnv::new();

  env.run(&["cart", "add", "0"]);
  env.run(&["cart", "add", "0", "-q", "2"]);

  let cart = env.json(&["cart", "list", "-o", "json"]);
  assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
  assert_eq!(cart["lines"][0]["quantity"], 3);
  assert_eq!(cart["total"], 60.0);
  assert_eq!(env.slot_value("cartItems")[0]["productId"], 0);
}

#[test]
fn add_with_swatch_captures_variant() {
  let env = TestEnv::new();

  env.run(&["cart", "add", "0", "--swatch", "blue"]);

  let line = &env.slot_value("cartItems")[0];
  assert_eq!(line["variantLabel"], "Blue");
  assert_eq!(line["image"], "linen-shirt-blue.png");
}

#[test]
fn add_unknown_product_fails() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["cart", "add", "99"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("No product at catalog index 99"));
}

#[test]
fn non_positive_quantity_is_clamped() {
  let env = TestEnv::new();

  env.run(&["cart", "add", "1", "-q", "0"]);
  env.run(&["cart", "set-quantity", "0", "-4"]);

  assert_eq!(env.slot_value("cartItems")[0]["quantity"], 1);
}

#[test]
fn remove_and_remove_at_agree() {
  let by_id = TestEnv::new();
  let by_position = TestEnv::new();
  for env in [&by_id, &by_position] {
    env.run(&["cart", "add", "0"]);
    env.run(&["cart", "add", "1"]);
    env.run(&["cart", "add", "2"]);
  }

  by_id.run(&["cart", "remove", "1", "--yes"]);
  by_position.run(&["cart", "remove-at", "1", "--yes"]);

  assert_eq!(by_id.slot_value("cartItems"), by_position.slot_value("cartItems"));
}

#[test]
fn remove_requires_confirmation_when_not_interactive() {
  let env = TestEnv::new();
  env.run(&["cart", "add", "0"]);

  env
    .cmd()
    .args(["cart", "remove", "0"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Not removing Linen Shirt from the cart"))
    .stderr(predicate::str::contains("--yes"));

  assert_eq!(env.slot_value("cartItems").as_array().unwrap().len(), 1);
}

#[test]
fn checkout_empties_cart_slot() {
  let env = TestEnv::new();
  env.run(&["cart", "add", "2", "-q", "2"]);

  env
    .cmd()
    .args(["cart", "checkout"])
    .assert()
    .success()
    .stdout(predicate::str::contains("$90.00"));

  assert_eq!(env.slot_value("cartItems"), json!([]));
}

#[test]
fn save_for_later_keeps_cart_line() {
  let env = TestEnv::new();
  env.run(&["cart", "add", "3", "-q", "2"]);

  env.run(&["cart", "save-for-later", "0"]);

  assert_eq!(env.slot_value("wishlist"), json!([3]));
  assert_eq!(env.slot_value("cartItems")[0]["quantity"], 2);
}

#[test]
fn corrupt_cart_slot_starts_empty() {
  let env = TestEnv::new();
  env.write_slot("cartItems", "this is not json");

  env
    .cmd()
    .args(["cart", "list"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Your cart is empty."));
}

#[test]
fn legacy_cookie_payload_is_migrated() {
  let env = TestEnv::new();
  env.write_slot(
    "cartItems",
    r#"[{"id": 1, "name": "Wool Socks", "price": 8.5, "img": "wool-socks.png", "quantity": 2}]"#,
  );

  let cart = env.json(&["cart", "list", "-o", "json"]);
  assert_eq!(cart["total"], 17.0);

  env.run(&["cart", "add", "1"]);
  let line = &env.slot_value("cartItems")[0];
  assert_eq!(line["productId"], 1);
  assert_eq!(line["quantity"], 3);
}

#[test]
fn zero_ttl_expires_immediately() {
  let env = TestEnv::new();
  env.cmd().env("CARTSYNC_TTL_DAYS", "0").args(["cart", "add", "0"]).assert().success();

  let cart = env.json(&["cart", "list", "-o", "json"]);
  assert_eq!(cart["lines"], json!([]));
}
