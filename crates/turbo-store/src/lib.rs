//! Storefront state container for TurboCommerce.
//!
//! Composes the catalog, session, cart and checkout pieces from
//! `turbo-commerce` and `turbo-auth` behind one [`Storefront`], adds drawer
//! and modal visibility, and persists the session and cart through
//! `turbo-cache`.
//!
//! # Example
//!
//! ```rust,no_run
//! use turbo_store::{Storefront, StoreConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoreConfig::load("store.toml")?;
//! turbo_store::logging::init(&config.logging)?;
//!
//! let store = Storefront::builder().config(config).build()?;
//! let products = store.fetch_products().await?;
//!
//! store.add_to_cart(&products[0], 2);
//! store.login("shopper@example.com", "Passw0rd").await?;
//! println!("subtotal: {}", store.subtotal());
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
pub mod logging;
pub mod persistence;
mod state;
mod storefront;

pub use config::StoreConfig;
pub use error::StoreError;
pub use persistence::{PersistedState, Persistence, SNAPSHOT_VERSION, STATE_KEY};
pub use state::{StoreState, UiState};
pub use storefront::{Storefront, StorefrontBuilder};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{StoreConfig, StoreError, StoreState, Storefront, UiState};
    pub use turbo_auth::{Role, Session};
    pub use turbo_commerce::prelude::*;
}
