use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::open_storefront;
use crate::output::{OutputFormat, print_info, print_json};

#[derive(Debug, Serialize)]
struct SearchHit<'a> {
  index: usize,
  name: &'a str,
  price: &'a str,
  wishlisted: bool,
}

pub fn cmd_search(query: &str, catalog: Option<&Path>, output: OutputFormat) -> Result<()> {
  let shop = open_storefront(catalog)?;

  let hits: Vec<SearchHit> = shop
    .catalog()
    .search(query)
    .into_iter()
    .map(|(index, product)| SearchHit {
      index,
      name: &product.name,
      price: &product.price_formatted,
      wishlisted: u32::try_from(index).is_ok_and(|id| shop.wishlist().contains(id)),
    })
    .collect();

  if output.is_json() {
    return print_json(&hits);
  }

  if hits.is_empty() {
    print_info(&format!("No products match {:?}", query));
    return Ok(());
  }

  for hit in &hits {
    let marker = if hit.wishlisted { " ♥" } else { "" };
    println!("  [{}] {} {}{}", hit.index, hit.name, hit.price, marker);
  }
  Ok(())
}
