use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::catalog::ProductId;
use crate::consts::CART_SLOT;
use crate::slot::{SlotCollection, decode_entries};

/// Clamp a requested quantity to the valid range `1..=u32::MAX`.
pub fn clamp_quantity(quantity: i64) -> u32 {
  quantity.clamp(1, i64::from(u32::MAX)) as u32
}

fn default_quantity() -> u32 {
  1
}

fn lenient_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
  i64::deserialize(deserializer).map(clamp_quantity)
}

/// Display fields captured when a product is added to the cart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineTemplate {
  pub name: String,
  pub unit_price: f64,
  pub image: String,
  pub variant_label: Option<String>,
}

/// One product in the cart.
///
/// `name`, `unit_price`, `image` and `variant_label` are copied from the
/// catalog when the line is created and are not refreshed afterwards.
/// Deserialization also accepts the field names of the older cookie format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  #[serde(alias = "id")]
  pub product_id: ProductId,
  pub name: String,
  #[serde(alias = "price")]
  pub unit_price: f64,
  #[serde(default, alias = "img")]
  pub image: String,
  #[serde(default, alias = "variant", alias = "swatch", skip_serializing_if = "Option::is_none")]
  pub variant_label: Option<String>,
  #[serde(default = "default_quantity", deserialize_with = "lenient_quantity")]
  pub quantity: u32,
}

impl CartLine {
  pub fn new(product_id: ProductId, template: LineTemplate, quantity: u32) -> Self {
    Self {
      product_id,
      name: template.name,
      unit_price: template.unit_price,
      image: template.image,
      variant_label: template.variant_label,
      quantity: quantity.max(1),
    }
  }

  pub fn subtotal(&self) -> f64 {
    self.unit_price * f64::from(self.quantity)
  }
}

impl SlotCollection for Vec<CartLine> {
  /// Decodes leniently and merges lines that share a product identity.
  fn from_value(value: Value) -> Self {
    let mut lines: Vec<CartLine> = Vec::new();
    for line in decode_entries::<CartLine>(CART_SLOT, value) {
      match lines.iter_mut().find(|l| l.product_id == line.product_id) {
        Some(existing) => {
          debug!(product_id = line.product_id, "merging duplicate persisted cart line");
          existing.quantity = existing.quantity.saturating_add(line.quantity);
        }
        None => lines.push(line),
      }
    }
    lines
  }
}
