mod cart;
mod search;
mod status;
mod wishlist;

pub use cart::{CartCommand, cmd_cart};
pub use search::cmd_search;
pub use status::cmd_status;
pub use wishlist::{WishlistCommand, cmd_wishlist};

use std::path::Path;

use anyhow::{Context, Result};
use cartsync_lib::Storefront;
use cartsync_lib::catalog::Catalog;
use cartsync_lib::config::Config;
use tracing::debug;

/// Resolve configuration, load the catalog, and initialize the storefront.
fn open_storefront(catalog: Option<&Path>) -> Result<Storefront> {
  let mut config = Config::from_env().context("Invalid configuration")?;
  if let Some(path) = catalog {
    config = config.with_catalog_path(path.to_path_buf());
  }
  debug!(catalog = %config.catalog_path.display(), slots = %config.slots_dir.display(), "opening storefront");
  let catalog = Catalog::load(&config.catalog_path).context("Failed to load catalog")?;
  Ok(Storefront::initialize(config, catalog))
}
