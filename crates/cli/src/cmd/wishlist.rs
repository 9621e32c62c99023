//! Implementation of the `cartsync wishlist` commands.
//!
//! Removals are confirmed before they reach the wishlist manager.

use std::path::Path;

use anyhow::{Result, bail};
use cartsync_lib::Storefront;
use cartsync_lib::catalog::ProductId;
use clap::Subcommand;

use super::open_storefront;
use crate::output::{OutputFormat, print_info, print_json, print_success, print_wishlist_item};
use crate::prompts::{Removal, confirm_removal};

#[derive(Subcommand, Debug)]
pub enum WishlistCommand {
  /// List wishlisted products
  List {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Add a catalog product to the wishlist
  Add {
    /// Catalog index of the product
    product: ProductId,
  },

  /// Remove a product from the wishlist
  Remove {
    /// Catalog index of the product
    product: ProductId,

    /// Skip confirmation prompt
    #[arg(short, long)]
    yes: bool,
  },

  /// Add the product if absent, remove it if present
  Toggle {
    /// Catalog index of the product
    product: ProductId,

    /// Skip confirmation prompt when removing
    #[arg(short, long)]
    yes: bool,
  },

  /// Add one unit of a wishlisted product to the cart
  MoveToCart {
    /// Catalog index of the product
    product: ProductId,
  },

  /// Remove every product from the wishlist
  Clear {
    /// Skip confirmation prompt
    #[arg(short, long)]
    yes: bool,
  },
}

pub fn cmd_wishlist(command: WishlistCommand, catalog: Option<&Path>) -> Result<()> {
  let mut shop = open_storefront(catalog)?;

  match command {
    WishlistCommand::List { output } => cmd_list(&shop, output),
    WishlistCommand::Add { product } => cmd_add(&mut shop, product),
    WishlistCommand::Remove { product, yes } => cmd_remove(&mut shop, product, yes),
    WishlistCommand::Toggle { product, yes } => cmd_toggle(&mut shop, product, yes),
    WishlistCommand::MoveToCart { product } => cmd_move_to_cart(&mut shop, product),
    WishlistCommand::Clear { yes } => cmd_clear(&mut shop, yes),
  }
}

fn product_name(shop: &Storefront, product: ProductId) -> String {
  shop
    .catalog()
    .get(product)
    .map(|p| p.name.clone())
    .unwrap_or_else(|| format!("product {}", product))
}

fn cmd_list(shop: &Storefront, output: OutputFormat) -> Result<()> {
  let items = shop.wishlist().materialize();

  if output.is_json() {
    return print_json(&items);
  }

  if items.is_empty() {
    print_info("Your wishlist is empty.");
    return Ok(());
  }

  for item in &items {
    print_wishlist_item(item);
  }
  print_info(&format!("{} product(s) in wishlist", items.len()));
  Ok(())
}

fn cmd_add(shop: &mut Storefront, product: ProductId) -> Result<()> {
  if shop.catalog().get(product).is_none() {
    bail!("No product at catalog index {}", product);
  }
  let name = product_name(shop, product);
  if shop.wishlist_mut().add(product) {
    print_success(&format!("{} added to wishlist", name));
  } else {
    print_info(&format!("{} is already in the wishlist", name));
  }
  Ok(())
}

fn cmd_remove(shop: &mut Storefront, product: ProductId, yes: bool) -> Result<()> {
  let name = product_name(shop, product);
  if !shop.wishlist().contains(product) {
    print_info(&format!("{} is not in the wishlist", name));
    return Ok(());
  }

  if !confirm_removal(Removal { subject: &name, from: "wishlist" }, yes)? {
    print_info("Cancelled");
    return Ok(());
  }

  shop.wishlist_mut().remove(product);
  print_success(&format!("{} removed from wishlist", name));
  Ok(())
}

fn cmd_toggle(shop: &mut Storefront, product: ProductId, yes: bool) -> Result<()> {
  if shop.wishlist().contains(product) {
    return cmd_remove(shop, product, yes);
  }
  cmd_add(shop, product)
}

fn cmd_move_to_cart(shop: &mut Storefront, product: ProductId) -> Result<()> {
  let name = product_name(shop, product);
  if !shop.move_to_cart(product) {
    bail!("No product at catalog index {}", product);
  }
  print_success(&format!("{} added to cart", name));
  Ok(())
}

fn cmd_clear(shop: &mut Storefront, yes: bool) -> Result<()> {
  if shop.wishlist().is_empty() {
    print_info("Your wishlist is empty.");
    return Ok(());
  }

  let subject = format!("all {} product(s)", shop.wishlist().len());
  if !confirm_removal(Removal { subject: &subject, from: "wishlist" }, yes)? {
    print_info("Cancelled");
    return Ok(());
  }

  shop.wishlist_mut().clear_all();
  print_success("Wishlist cleared");
  Ok(())
}
