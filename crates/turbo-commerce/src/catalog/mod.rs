//! Product catalog module.
//!
//! Contains the product type and the provider that serves the catalog.

mod product;
mod source;

pub use product::Product;
pub use source::{CatalogProvider, ProductSource, StaticCatalog, DEFAULT_CATALOG_LATENCY};
