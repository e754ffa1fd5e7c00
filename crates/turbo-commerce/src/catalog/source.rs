//! Catalog Provider: where the product list comes from.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::catalog::Product;
use crate::clock::Delay;
use crate::error::CommerceError;
use crate::money::Money;

/// Default simulated catalog latency.
pub const DEFAULT_CATALOG_LATENCY: Duration = Duration::from_millis(200);

/// A source of catalog products.
///
/// The built-in [`StaticCatalog`] never fails; a networked source reports
/// [`CommerceError::CatalogUnavailable`].
pub trait ProductSource: Send + Sync {
    fn products(&self) -> Result<Vec<Product>, CommerceError>;
}

impl<P: ProductSource + ?Sized> ProductSource for Box<P> {
    fn products(&self) -> Result<Vec<Product>, CommerceError> {
        (**self).products()
    }
}

/// The fixed, hardcoded bakery catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalog;

impl ProductSource for StaticCatalog {
    fn products(&self) -> Result<Vec<Product>, CommerceError> {
        Ok(bakery_products())
    }
}

fn bakery_products() -> Vec<Product> {
    vec![
        Product::new(
            "choco-delight",
            "Chocolate Delight",
            "Rich dark chocolate cake with ganache frosting.",
            Money::usd(2999),
            "https://images.unsplash.com/photo-1554298377-9e4df6fd965c?w=1600&auto=format&fit=crop&q=80",
        )
        .with_thumb("https://images.unsplash.com/photo-1606313564200-e75d5e30476b?q=60&w=400&auto=format&fit=crop"),
        Product::new(
            "strawberry-dream",
            "Strawberry Dream",
            "Vanilla sponge with fresh strawberries and cream.",
            Money::usd(2450),
            "https://images.unsplash.com/photo-1623406827446-bca8c08b85fd?w=1600&auto=format&fit=crop&q=80",
        )
        .with_thumb("https://images.unsplash.com/photo-1542826438-1c3d968a2683?q=60&w=400&auto=format&fit=crop"),
        Product::new(
            "purple-velvet",
            "Purple Velvet",
            "Velvety sponge with lavender buttercream.",
            Money::usd(3200),
            "https://images.unsplash.com/photo-1570667613884-ad23a42b57e8?w=1600&auto=format&fit=crop&q=80",
        )
        .with_thumb("https://images.unsplash.com/photo-1618886614638-cfe7a4bdf3f3?q=60&w=400&auto=format&fit=crop"),
        Product::new(
            "blueberry-bliss",
            "Blueberry Bliss",
            "Lemon cake topped with blueberry compote.",
            Money::usd(2775),
            "https://images.unsplash.com/photo-1606890737304-57a1ca8a5b62?q=80&w=800&auto=format&fit=crop",
        )
        .with_thumb("https://images.unsplash.com/photo-1606890737304-57a1ca8a5b62?q=60&w=400&auto=format&fit=crop"),
    ]
}

/// Serves the catalog after a simulated network delay.
pub struct CatalogProvider {
    source: Box<dyn ProductSource>,
    delay: Arc<dyn Delay>,
    latency: Duration,
}

impl CatalogProvider {
    /// Create a provider over any product source.
    pub fn new(source: impl ProductSource + 'static, delay: Arc<dyn Delay>) -> Self {
        Self {
            source: Box::new(source),
            delay,
            latency: DEFAULT_CATALOG_LATENCY,
        }
    }

    /// The static catalog with the default latency.
    pub fn static_catalog(delay: Arc<dyn Delay>) -> Self {
        Self::new(StaticCatalog, delay)
    }

    /// Override the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Wait out the simulated latency, then return the full product list.
    ///
    /// Repeated calls return the same data.
    #[instrument(skip(self), fields(latency_ms = self.latency.as_millis() as u64))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CommerceError> {
        self.delay.sleep(self.latency).await;
        let products = self.source.products()?;
        debug!(count = products.len(), "catalog fetched");
        Ok(products)
    }
}

impl std::fmt::Debug for CatalogProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogProvider")
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}
