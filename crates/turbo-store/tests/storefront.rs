//! End-to-end behaviour of the storefront container.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use turbo_cache::{CacheError, FileStore, KeyValueStore, MemoryStore};
use turbo_store::config::{LatencyConfig, StorageBackend};
use turbo_store::prelude::*;
use turbo_store::{PersistedState, STATE_KEY};

/// Counts writes and forwards to a shared memory store.
#[derive(Clone, Default)]
struct CountingStore {
    inner: MemoryStore,
    writes: Arc<AtomicUsize>,
}

impl CountingStore {
    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.inner.delete(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.inner.keys()
    }
}

/// Rejects every write.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
        Err(CacheError::StoreError("read-only".to_string()))
    }

    fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(Vec::new())
    }
}

fn build(store: impl KeyValueStore + 'static) -> Storefront {
    Storefront::builder()
        .clock(FixedClock(1_700_000_000))
        .delay(NoDelay)
        .store(store)
        .build()
        .unwrap()
}

fn cake(id: &str, cents: i64) -> Product {
    Product::new(id, id, "A cake.", Money::usd(cents), format!("{id}.jpg"))
}

fn filled_form() -> CheckoutForm {
    CheckoutForm {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        address: "1 Baker St".to_string(),
        city: "London".to_string(),
        zip: "12345".to_string(),
        method: "card".to_string(),
    }
}

fn expected_subtotal(cart: &Cart) -> i64 {
    cart.lines()
        .iter()
        .map(|l| l.price.amount_cents * i64::from(l.qty))
        .sum()
}

#[tokio::test]
async fn test_subtotal_tracks_every_mutation() {
    let store = build(MemoryStore::new());
    let products = store.fetch_products().await.unwrap();
    let check = |store: &Storefront| {
        let cart = store.cart();
        assert_eq!(store.subtotal().amount_cents, expected_subtotal(&cart));
    };

    store.add_to_cart(&products[0], 2);
    check(&store);
    store.add_to_cart(&products[1], 1);
    check(&store);
    store.update_qty(&products[0].id, Some(7));
    check(&store);
    store.remove_from_cart(&products[1].id);
    check(&store);
    store.add_to_cart(&products[0], 200);
    check(&store);
    store.clear_cart();
    check(&store);
}

#[test]
fn test_add_existing_clamps_at_99() {
    let store = build(MemoryStore::new());
    let product = cake("a", 100);

    store.add_to_cart(&product, 97);
    store.add_to_cart(&product, 5);

    let cart = store.cart();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(&product.id).unwrap().qty.get(), 99);
}

#[test]
fn test_update_qty_clamps_both_ends() {
    let store = build(MemoryStore::new());
    let product = cake("a", 100);
    store.add_to_cart(&product, 3);

    store.update_qty(&product.id, Some(0));
    assert_eq!(store.cart().get(&product.id).unwrap().qty.get(), 1);

    store.update_qty(&product.id, Some(500));
    assert_eq!(store.cart().get(&product.id).unwrap().qty.get(), 99);

    store.update_qty(&product.id, None);
    assert_eq!(store.cart().get(&product.id).unwrap().qty.get(), 1);
}

#[test]
fn test_remove_absent_is_noop() {
    let store = build(MemoryStore::new());
    store.add_to_cart(&cake("a", 100), 1);
    let before = store.cart();

    store.remove_from_cart(&ProductId::new("nope"));
    assert_eq!(store.cart(), before);
}

#[tokio::test]
async fn test_login_roles() {
    let store = build(MemoryStore::new());

    let admin = store.login("admin@x.com", "Passw0rd").await.unwrap();
    assert_eq!(admin.role, Role::Admin);

    let shopper = store.login("shopper@x.com", "Passw0rd").await.unwrap();
    assert_eq!(shopper.role, Role::Customer);
    assert_eq!(store.user().unwrap().email, "shopper@x.com");

    let err = store.login("a@b.com", "weak").await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Auth(turbo_auth::AuthError::InvalidCredentials)
    ));
    assert_eq!(err.user_message(), "Invalid email or password.");
    // A failed attempt keeps the previous session.
    assert_eq!(store.user().unwrap().email, "shopper@x.com");
}

#[tokio::test]
async fn test_login_closes_auth_modal_and_logout_clears() {
    let store = build(MemoryStore::new());
    store.open_auth();
    assert!(store.ui().auth_open);

    store.login("shopper@x.com", "Passw0rd").await.unwrap();
    assert!(!store.ui().auth_open);
    assert!(store.snapshot().is_logged_in());

    store.logout();
    assert!(store.user().is_none());
    store.logout();
    assert!(store.user().is_none());
}

#[test]
fn test_clear_cart_zeroes_subtotal() {
    let store = build(MemoryStore::new());
    store.add_to_cart(&cake("a", 1234), 3);
    store.clear_cart();

    assert!(store.cart().is_empty());
    assert!(store.subtotal().is_zero());
}

#[tokio::test]
async fn test_snapshot_roundtrip_across_restart() {
    let backend = MemoryStore::new();
    let first = build(backend.clone());
    first.login("jane@example.com", "Passw0rd").await.unwrap();
    first.add_to_cart(&cake("a", 2999), 2);
    first.add_to_cart(&cake("b", 2450), 1);
    first.add_to_cart(&cake("c", 3200), 99);
    first.open_cart();

    let second = build(backend);
    let state = second.snapshot();

    assert_eq!(state.cart, first.cart());
    assert_eq!(state.user, first.user());
    assert_eq!(state.ui, UiState::default());
    assert!(state.products.is_empty());
}

#[test]
fn test_file_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = StoreConfig::default();
    config.storage.backend = StorageBackend::File;
    config.storage.data_dir = dir.path().to_path_buf();
    config.latency = LatencyConfig::none();

    let first = Storefront::builder().config(config.clone()).build().unwrap();
    first.add_to_cart(&cake("a", 500), 4);

    let second = Storefront::builder().config(config).build().unwrap();
    assert_eq!(second.cart(), first.cart());

    let files = FileStore::open(dir.path()).unwrap().keys().unwrap();
    assert_eq!(files, vec![STATE_KEY.to_string()]);
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let backend = MemoryStore::new();
    backend.set(STATE_KEY, b"\x00\x01 definitely not json").unwrap();

    let store = build(backend);
    let state = store.snapshot();
    assert!(state.cart.is_empty());
    assert!(state.user.is_none());
    assert_eq!(state.ui, UiState::default());
}

#[test]
fn test_unknown_version_starts_empty() {
    let backend = MemoryStore::new();
    let mut snapshot = PersistedState::default();
    snapshot.version = 99;
    snapshot.cart.add(&cake("a", 100), 1);
    backend
        .set(STATE_KEY, &serde_json::to_vec(&snapshot).unwrap())
        .unwrap();

    let store = build(backend);
    assert!(store.cart().is_empty());
}

#[tokio::test]
async fn test_ui_toggles_never_persist() {
    let backend = CountingStore::default();
    let store = build(backend.clone());
    store.fetch_products().await.unwrap();

    store.open_cart();
    store.close_cart();
    store.open_auth();
    store.close_auth();
    assert_eq!(backend.writes(), 0);

    store.add_to_cart(&cake("a", 100), 1);
    assert_eq!(backend.writes(), 1);
}

#[tokio::test]
async fn test_logout_without_session_writes_nothing() {
    let backend = CountingStore::default();
    let store = build(backend.clone());
    let mut rx = store.subscribe();

    store.logout();
    store.clear_cart();
    assert_eq!(backend.writes(), 0);
    assert!(!rx.has_changed().unwrap());

    store.login("shopper@x.com", "Passw0rd").await.unwrap();
    assert_eq!(backend.writes(), 1);
    store.logout();
    assert_eq!(backend.writes(), 2);
    assert!(store.persistence().load().unwrap().unwrap().user.is_none());
}

#[test]
fn test_second_currency_is_refused() {
    let store = build(MemoryStore::new());
    store.add_to_cart(&cake("a", 1000), 1);
    store.add_to_cart(
        &Product::new("eu", "Euro cake", "", Money::new(1000, Currency::EUR), "eu.jpg"),
        1,
    );

    assert_eq!(store.cart().len(), 1);
    assert_eq!(store.subtotal(), Money::usd(1000));
}

#[test]
fn test_write_failure_keeps_memory_state() {
    let store = build(ReadOnlyStore);
    store.add_to_cart(&cake("a", 100), 2);
    assert_eq!(store.cart().item_count(), 2);
}

#[tokio::test]
async fn test_observers_see_each_change() {
    let store = build(MemoryStore::new());
    let mut rx = store.subscribe();

    store.add_to_cart(&cake("a", 100), 1);
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().cart.len(), 1);

    store.open_cart();
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().ui.cart_open);
}

#[tokio::test]
async fn test_checkout_on_empty_cart_fails() {
    let store = build(MemoryStore::new());
    let err = store.place_order(&filled_form()).await.unwrap_err();
    assert!(matches!(err, StoreError::Commerce(CommerceError::EmptyCart)));
}

#[tokio::test]
async fn test_invalid_checkout_keeps_cart() {
    let store = build(MemoryStore::new());
    store.add_to_cart(&cake("a", 100), 1);

    let mut form = filled_form();
    form.zip = "12".to_string();
    form.method = "bitcoin".to_string();

    let err = store.place_order(&form).await.unwrap_err();
    let StoreError::Commerce(CommerceError::InvalidCheckout(errors)) = err else {
        panic!("expected validation errors, got {err:?}");
    };
    assert_eq!(
        errors.get(CheckoutField::Zip),
        Some("Enter a valid ZIP/Postal code")
    );
    assert_eq!(
        errors.get(CheckoutField::Method),
        Some("Select a payment method")
    );
    assert_eq!(store.cart().len(), 1);
}

#[tokio::test]
async fn test_valid_checkout_clears_cart() {
    let backend = MemoryStore::new();
    let store = build(backend.clone());
    store.add_to_cart(&cake("a", 2999), 2);

    let confirmation = store.place_order(&filled_form()).await.unwrap();
    assert_eq!(confirmation.subtotal, Money::usd(5998));
    assert_eq!(confirmation.item_count, 2);
    assert_eq!(confirmation.method, PaymentMethod::Card);
    assert!(store.cart().is_empty());

    let restored = build(backend);
    assert!(restored.cart().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_configured_latency_is_honoured() {
    let mut config = StoreConfig::default();
    config.latency = LatencyConfig {
        catalog_ms: 200,
        login_ms: 250,
        checkout_ms: 800,
    };
    let store = Storefront::builder()
        .config(config)
        .clock(FixedClock(0))
        .delay(TokioDelay)
        .store(MemoryStore::new())
        .build()
        .unwrap();

    let start = tokio::time::Instant::now();
    store.fetch_products().await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(200));

    let start = tokio::time::Instant::now();
    store.login("shopper@x.com", "Passw0rd").await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(250));
}

#[tokio::test]
async fn test_offline_catalog_surfaces_error() {
    struct Offline;

    impl ProductSource for Offline {
        fn products(&self) -> Result<Vec<Product>, CommerceError> {
            Err(CommerceError::CatalogUnavailable("offline".to_string()))
        }
    }

    let store = Storefront::builder()
        .delay(NoDelay)
        .product_source(Offline)
        .store(MemoryStore::new())
        .build()
        .unwrap();

    let err = store.fetch_products().await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Commerce(CommerceError::CatalogUnavailable(_))
    ));
    assert!(store.snapshot().products.is_empty());
}
