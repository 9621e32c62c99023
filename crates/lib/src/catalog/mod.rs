//! Read-only product catalog.
//!
//! Products are addressed by their position in the catalog. The catalog is
//! the source of truth for names, prices and images; the synchronizer only
//! ever reads from it.

mod types;

pub use types::{Catalog, CatalogError, Product, ProductId, Swatch};

#[cfg(test)]
pub(crate) use types::tests::sample_catalog;
