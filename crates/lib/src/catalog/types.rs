use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cart::LineTemplate;

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("failed to read catalog {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse catalog {path}: {source}")]
  Parse {
    path: String,
    #[source]
    source: serde_json::Error,
  },
}

/// Position of a product in the catalog.
pub type ProductId = u32;

/// A colour or finish a product is offered in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
  pub name: String,
  #[serde(default)]
  pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: String,
  pub name: String,
  pub price: f64,
  #[serde(default)]
  pub price_formatted: String,
  #[serde(default)]
  pub images: Vec<String>,
  #[serde(default)]
  pub swatches: Vec<Swatch>,
}

impl Product {
  /// Display fields captured into a cart line when this product is added.
  ///
  /// With a swatch, the swatch name becomes the variant label and its image
  /// (when it has one) replaces the product's primary image.
  pub fn line_template(&self, swatch: Option<&str>) -> LineTemplate {
    let selected = swatch.and_then(|name| self.swatches.iter().find(|s| s.name.eq_ignore_ascii_case(name)));
    let image = selected
      .and_then(|s| s.image.clone())
      .or_else(|| self.images.first().cloned())
      .unwrap_or_default();

    LineTemplate {
      name: self.name.clone(),
      unit_price: self.price,
      image,
      variant_label: selected.map(|s| s.name.clone()).or_else(|| swatch.map(str::to_string)),
    }
  }
}

/// The static product list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
  products: Vec<Product>,
}

impl Catalog {
  pub fn new(products: Vec<Product>) -> Self {
    Self { products }
  }

  /// Load a catalog from a JSON array of products.
  pub fn load(path: &Path) -> Result<Self, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
      path: path.display().to_string(),
      source,
    })?;
    let products: Vec<Product> = serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
      path: path.display().to_string(),
      source,
    })?;
    debug!(path = %path.display(), products = products.len(), "catalog loaded");
    Ok(Self::new(products))
  }

  pub fn len(&self) -> usize {
    self.products.len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.is_empty()
  }

  pub fn products(&self) -> &[Product] {
    &self.products
  }

  /// Bounds-checked lookup. Negative and out-of-range indices return `None`.
  pub fn by_index(&self, index: i64) -> Option<&Product> {
    usize::try_from(index).ok().and_then(|i| self.products.get(i))
  }

  /// Lookup by product identity.
  pub fn get(&self, id: ProductId) -> Option<&Product> {
    self.by_index(i64::from(id))
  }

  /// Position of the first product whose name equals `name`, ignoring case.
  pub fn find_by_name(&self, name: &str) -> Option<usize> {
    let needle = name.to_lowercase();
    self.products.iter().position(|p| p.name.to_lowercase() == needle)
  }

  /// Products whose name contains `query`, ignoring case, in catalog order.
  ///
  /// An empty query matches nothing.
  pub fn search(&self, query: &str) -> Vec<(usize, &Product)> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
      return Vec::new();
    }
    self
      .products
      .iter()
      .enumerate()
      .filter(|(_, p)| p.name.to_lowercase().contains(&needle))
      .collect()
  }
}
