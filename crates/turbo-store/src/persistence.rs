//! Snapshot persistence.
//!
//! The durable part of the state (session and cart) is written as a single
//! JSON document under one key. Anything unreadable on startup is discarded
//! and the storefront starts empty.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use turbo_auth::Session;
use turbo_cache::{Cache, CacheError, KeyValueStore};
use turbo_commerce::cart::Cart;

use crate::state::StoreState;

/// Default key for the persisted snapshot.
pub const STATE_KEY: &str = "cake_store_state";

/// Current snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The persisted `{version, user, cart}` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Format version. Snapshots written before versioning count as 1.
    #[serde(default = "current_version")]
    pub version: u32,
    pub user: Option<Session>,
    #[serde(default)]
    pub cart: Cart,
}

fn current_version() -> u32 {
    SNAPSHOT_VERSION
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            user: None,
            cart: Cart::new(),
        }
    }
}

impl PersistedState {
    /// Capture the durable part of `state`.
    pub fn capture(state: &StoreState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            user: state.user.clone(),
            cart: state.cart.clone(),
        }
    }

    /// Fresh state seeded from this snapshot.
    pub fn into_state(self) -> StoreState {
        StoreState {
            user: self.user,
            cart: self.cart,
            ..StoreState::default()
        }
    }
}

/// Reads and writes [`PersistedState`] through a key-value backend.
pub struct Persistence<S = Box<dyn KeyValueStore>> {
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> Persistence<S> {
    /// Persist under [`STATE_KEY`].
    pub fn new(store: S) -> Self {
        Self {
            cache: Cache::new(store),
            key: STATE_KEY.to_string(),
        }
    }

    /// Use a different key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying backend.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Write the full snapshot.
    pub fn save(&self, snapshot: &PersistedState) -> Result<(), CacheError> {
        self.cache.set(&self.key, snapshot)?;
        debug!(
            key = %self.key,
            lines = snapshot.cart.len(),
            logged_in = snapshot.user.is_some(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Read the snapshot, surfacing decode and storage errors.
    pub fn load(&self) -> Result<Option<PersistedState>, CacheError> {
        self.cache.get(&self.key)
    }

    /// Read the snapshot for startup.
    ///
    /// Never fails: a missing, corrupt, or unsupported snapshot yields the
    /// empty state.
    pub fn restore(&self) -> PersistedState {
        match self.load() {
            Ok(Some(snapshot)) if snapshot.version == SNAPSHOT_VERSION => {
                debug!(key = %self.key, lines = snapshot.cart.len(), "snapshot restored");
                snapshot
            }
            Ok(Some(snapshot)) => {
                warn!(
                    key = %self.key,
                    version = snapshot.version,
                    "discarding snapshot with unsupported version"
                );
                PersistedState::default()
            }
            Ok(None) => PersistedState::default(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding unreadable snapshot");
                PersistedState::default()
            }
        }
    }

    /// Remove the snapshot.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.cache.delete(&self.key)
    }
}

impl<S> std::fmt::Debug for Persistence<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
