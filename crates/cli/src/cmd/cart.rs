//! Implementation of the `cartsync cart` commands.

use std::path::Path;

use anyhow::{Result, bail};
use cartsync_lib::Storefront;
use cartsync_lib::catalog::ProductId;
use clap::Subcommand;
use serde::Serialize;

use super::open_storefront;
use crate::output::{
  OutputFormat, format_price, print_cart_line, print_info, print_json, print_stat, print_success,
};
use crate::prompts::{Removal, confirm_removal};

#[derive(Subcommand, Debug)]
pub enum CartCommand {
  /// List cart lines and the total
  List {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Add a catalog product to the cart
  Add {
    /// Catalog index of the product
    product: ProductId,

    /// Units to add
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    quantity: i64,

    /// Swatch (variant) to add
    #[arg(short, long)]
    swatch: Option<String>,
  },

  /// Remove the line for a product
  Remove {
    /// Catalog index of the product
    product: ProductId,

    /// Skip confirmation prompt
    #[arg(short, long)]
    yes: bool,
  },

  /// Remove the line at a list position
  RemoveAt {
    /// Position as shown by `cart list`
    position: usize,

    /// Skip confirmation prompt
    #[arg(short, long)]
    yes: bool,
  },

  /// Set the quantity of the line at a list position
  SetQuantity {
    /// Position as shown by `cart list`
    position: usize,

    /// New quantity; values below 1 become 1
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
  },

  /// Copy the product of a cart line into the wishlist
  SaveForLater {
    /// Position as shown by `cart list`
    position: usize,
  },

  /// Remove every line from the cart
  Clear {
    /// Skip confirmation prompt
    #[arg(short, long)]
    yes: bool,
  },

  /// Check out: report the total and empty the cart
  Checkout,
}

#[derive(Debug, Serialize)]
struct CartOutput<'a> {
  lines: &'a [cartsync_lib::cart::CartLine],
  count: u64,
  total: f64,
}

pub fn cmd_cart(command: CartCommand, catalog: Option<&Path>) -> Result<()> {
  let mut shop = open_storefront(catalog)?;

  match command {
    CartCommand::List { output } => cmd_list(&shop, output),
    CartCommand::Add {
      product,
      quantity,
      swatch,
    } => cmd_add(&mut shop, product, quantity, swatch.as_deref()),
    CartCommand::Remove { product, yes } => cmd_remove(&mut shop, product, yes),
    CartCommand::RemoveAt { position, yes } => cmd_remove_at(&mut shop, position, yes),
    CartCommand::SetQuantity { position, quantity } => cmd_set_quantity(&mut shop, position, quantity),
    CartCommand::SaveForLater { position } => cmd_save_for_later(&mut shop, position),
    CartCommand::Clear { yes } => cmd_clear(&mut shop, yes),
    CartCommand::Checkout => cmd_checkout(&mut shop),
  }
}

fn cmd_list(shop: &Storefront, output: OutputFormat) -> Result<()> {
  let cart = shop.cart();

  if output.is_json() {
    return print_json(&CartOutput {
      lines: cart.lines(),
      count: cart.count(),
      total: cart.total(),
    });
  }

  if cart.is_empty() {
    print_info("Your cart is empty.");
    return Ok(());
  }

  for (position, line) in cart.lines().iter().enumerate() {
    print_cart_line(position, line);
  }
  println!();
  print_stat("Items", &cart.count().to_string());
  print_stat("Total", &format_price(cart.total()));
  Ok(())
}

fn cmd_add(shop: &mut Storefront, product: ProductId, quantity: i64, swatch: Option<&str>) -> Result<()> {
  let Some(new_quantity) = shop.add_to_cart(product, swatch, quantity) else {
    bail!("No product at catalog index {}", product);
  };
  let name = shop.cart().find(product).map(|l| l.name.clone()).unwrap_or_default();
  print_success(&format!("{} in cart (quantity {})", name, new_quantity));
  Ok(())
}

fn cmd_remove(shop: &mut Storefront, product: ProductId, yes: bool) -> Result<()> {
  let Some(line) = shop.cart().find(product) else {
    print_info(&format!("Product {} is not in the cart", product));
    return Ok(());
  };

  if !confirm_removal(Removal { subject: &line.name, from: "cart" }, yes)? {
    print_info("Cancelled");
    return Ok(());
  }

  shop.cart_mut().remove(product);
  print_success("Removed from cart");
  Ok(())
}

fn cmd_remove_at(shop: &mut Storefront, position: usize, yes: bool) -> Result<()> {
  let Some(line) = shop.cart().get(position) else {
    print_info(&format!("No cart line at position {}", position));
    return Ok(());
  };

  if !confirm_removal(Removal { subject: &line.name, from: "cart" }, yes)? {
    print_info("Cancelled");
    return Ok(());
  }

  shop.cart_mut().remove_at(position);
  print_success("Removed from cart");
  Ok(())
}

fn cmd_set_quantity(shop: &mut Storefront, position: usize, quantity: i64) -> Result<()> {
  if !shop.cart_mut().update_quantity(position, quantity) {
    print_info(&format!("No cart line at position {}", position));
    return Ok(());
  }
  if let Some(line) = shop.cart().get(position) {
    print_success(&format!("{} quantity set to {}", line.name, line.quantity));
  }
  Ok(())
}

fn cmd_save_for_later(shop: &mut Storefront, position: usize) -> Result<()> {
  match shop.save_for_later(position) {
    Some(id) => print_success(&format!("Product {} saved to wishlist", id)),
    None => print_info(&format!("No cart line at position {}", position)),
  }
  Ok(())
}

fn cmd_clear(shop: &mut Storefront, yes: bool) -> Result<()> {
  if shop.cart().is_empty() {
    print_info("Your cart is empty.");
    return Ok(());
  }

  let subject = format!("all {} line(s)", shop.cart().len());
  if !confirm_removal(Removal { subject: &subject, from: "cart" }, yes)? {
    print_info("Cancelled");
    return Ok(());
  }

  shop.cart_mut().clear();
  print_success("Cart cleared");
  Ok(())
}

fn cmd_checkout(shop: &mut Storefront) -> Result<()> {
  if shop.cart().is_empty() {
    print_info("Your cart is empty.");
    return Ok(());
  }

  let total = shop.checkout();
  print_success(&format!("Checked out, total {}", format_price(total)));
  Ok(())
}
