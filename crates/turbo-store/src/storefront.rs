//! The storefront state container.
//!
//! [`Storefront`] owns the current [`StoreState`] and is its only mutation
//! surface. Each operation replaces the snapshot in one step through a
//! `watch` channel; operations that touch the session or cart also write
//! the persisted snapshot inside that same step, so what observers see and
//! what is on disk never disagree.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, instrument, warn};
use turbo_auth::{Session, SessionManager};
use turbo_cache::{FileStore, KeyValueStore, MemoryStore};
use turbo_commerce::cart::Cart;
use turbo_commerce::catalog::{CatalogProvider, Product, ProductSource, StaticCatalog};
use turbo_commerce::checkout::{CheckoutForm, CheckoutService, OrderConfirmation};
use turbo_commerce::clock::{Clock, Delay, SystemClock, TokioDelay};
use turbo_commerce::{Money, ProductId};

use crate::config::{StorageBackend, StoreConfig};
use crate::persistence::{PersistedState, Persistence};
use crate::state::{StoreState, UiState};
use crate::StoreError;

/// Single-user storefront state and the operations that change it.
pub struct Storefront {
    state: watch::Sender<StoreState>,
    catalog: CatalogProvider,
    sessions: SessionManager,
    checkout: CheckoutService,
    persistence: Persistence,
}

impl Storefront {
    pub fn builder() -> StorefrontBuilder {
        StorefrontBuilder::default()
    }

    /// Receive every new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Cart subtotal of the current snapshot.
    pub fn subtotal(&self) -> Money {
        self.state.borrow().subtotal()
    }

    pub fn user(&self) -> Option<Session> {
        self.state.borrow().user.clone()
    }

    pub fn cart(&self) -> Cart {
        self.state.borrow().cart.clone()
    }

    pub fn ui(&self) -> UiState {
        self.state.borrow().ui
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    // Catalog

    /// Fetch the catalog and replace `products`.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.catalog.fetch_products().await?;
        let published = products.clone();
        self.update(Durability::Transient, move |state| {
            state.products = published;
            true
        });
        Ok(products)
    }

    // Session

    /// Log in, replacing any current session and closing the auth modal.
    ///
    /// On failure the state is untouched.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        let session = self.sessions.login(email, password).await?;
        let stored = session.clone();
        self.update(Durability::Durable, move |state| {
            state.user = Some(stored);
            state.ui.auth_open = false;
            true
        });
        Ok(session)
    }

    /// Drop the session. A no-op when nobody is logged in.
    pub fn logout(&self) {
        if self.update(Durability::Durable, |state| state.user.take().is_some()) {
            info!("logged out");
        }
    }

    // Cart

    /// Add `qty` of `product`, merging into an existing line.
    ///
    /// A product priced in a different currency from the cart is refused.
    pub fn add_to_cart(&self, product: &Product, qty: i64) {
        let added = self.update(Durability::Durable, |state| state.cart.add(product, qty));
        if !added {
            warn!(
                product = %product.id,
                currency = %product.price.currency,
                "refused product in a second currency"
            );
        }
    }

    /// Remove a line. Absent ids are ignored.
    pub fn remove_from_cart(&self, id: &ProductId) {
        self.update(Durability::Durable, |state| state.cart.remove(id));
    }

    /// Set a line's quantity (clamped). `None` means 1.
    pub fn update_qty(&self, id: &ProductId, qty: Option<i64>) {
        self.update(Durability::Durable, |state| state.cart.update_qty(id, qty));
    }

    pub fn clear_cart(&self) {
        self.update(Durability::Durable, |state| {
            let had_lines = !state.cart.is_empty();
            state.cart.clear();
            had_lines
        });
    }

    // UI

    pub fn open_cart(&self) {
        self.set_ui(|ui| ui.cart_open = true);
    }

    pub fn close_cart(&self) {
        self.set_ui(|ui| ui.cart_open = false);
    }

    pub fn open_auth(&self) {
        self.set_ui(|ui| ui.auth_open = true);
    }

    pub fn close_auth(&self) {
        self.set_ui(|ui| ui.auth_open = false);
    }

    // Checkout

    /// A checkout form with name and email taken from the session.
    pub fn checkout_form(&self) -> CheckoutForm {
        match &self.state.borrow().user {
            Some(user) => CheckoutForm::prefilled(user.name.clone(), user.email.clone()),
            None => CheckoutForm::default(),
        }
    }

    /// Validate, simulate payment for the current cart, then clear it.
    ///
    /// Validation and empty-cart failures leave the cart as it was.
    #[instrument(skip_all)]
    pub async fn place_order(&self, form: &CheckoutForm) -> Result<OrderConfirmation, StoreError> {
        let cart = self.cart();
        let confirmation = self.checkout.submit(form, &cart).await?;
        self.clear_cart();
        Ok(confirmation)
    }

    fn set_ui(&self, toggle: impl FnOnce(&mut UiState)) {
        self.update(Durability::Transient, |state| {
            let before = state.ui;
            toggle(&mut state.ui);
            state.ui != before
        });
    }

    /// Apply `mutate` to the snapshot. When it reports a change, durable
    /// updates are written through and observers are notified.
    fn update(
        &self,
        durability: Durability,
        mutate: impl FnOnce(&mut StoreState) -> bool,
    ) -> bool {
        self.state.send_if_modified(|state| {
            let changed = mutate(state);
            if changed && durability == Durability::Durable {
                self.persist(state);
            }
            changed
        })
    }

    fn persist(&self, state: &StoreState) {
        if let Err(e) = self.persistence.save(&PersistedState::capture(state)) {
            warn!(error = %e, key = self.persistence.key(), "failed to persist snapshot");
        }
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("catalog", &self.catalog)
            .field("sessions", &self.sessions)
            .field("checkout", &self.checkout)
            .field("persistence", &self.persistence)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Durability {
    /// Products and UI flags.
    Transient,
    /// Session and cart.
    Durable,
}

/// Builds a [`Storefront`] from config and injected capabilities.
pub struct StorefrontBuilder {
    config: StoreConfig,
    clock: Arc<dyn Clock>,
    delay: Arc<dyn Delay>,
    source: Box<dyn ProductSource>,
    store: Option<Box<dyn KeyValueStore>>,
}

impl Default for StorefrontBuilder {
    fn default() -> Self {
        Self {
            config: StoreConfig::default(),
            clock: Arc::new(SystemClock),
            delay: Arc::new(TokioDelay),
            source: Box::new(StaticCatalog),
            store: None,
        }
    }
}

impl StorefrontBuilder {
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn delay(mut self, delay: impl Delay + 'static) -> Self {
        self.delay = Arc::new(delay);
        self
    }

    /// Serve products from `source` instead of the built-in catalog.
    pub fn product_source(mut self, source: impl ProductSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Use `store` instead of the backend named in the config.
    pub fn store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Open storage, restore the persisted snapshot and wire the services.
    ///
    /// Only opening the storage backend can fail; an unreadable snapshot
    /// starts the storefront empty.
    pub fn build(self) -> Result<Storefront, StoreError> {
        let Self {
            config,
            clock,
            delay,
            source,
            store,
        } = self;

        let store: Box<dyn KeyValueStore> = match store {
            Some(store) => store,
            None => match config.storage.backend {
                StorageBackend::Memory => Box::new(MemoryStore::new()),
                StorageBackend::File => Box::new(FileStore::open(&config.storage.data_dir)?),
            },
        };
        let persistence = Persistence::new(store).with_key(config.storage.key.clone());
        let initial = persistence.restore().into_state();
        info!(
            key = persistence.key(),
            lines = initial.cart.len(),
            logged_in = initial.is_logged_in(),
            "storefront ready"
        );

        let (state, _) = watch::channel(initial);
        Ok(Storefront {
            state,
            catalog: CatalogProvider::new(source, delay.clone())
                .with_latency(config.latency.catalog()),
            sessions: SessionManager::new(clock, delay.clone())
                .with_latency(config.latency.login()),
            checkout: CheckoutService::new(delay).with_latency(config.latency.checkout()),
            persistence,
        })
    }
}
