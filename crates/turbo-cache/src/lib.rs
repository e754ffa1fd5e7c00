//! Type-safe Key-Value storage layer for TurboCommerce.
//!
//! A [`Cache`] wraps any [`KeyValueStore`] backend and handles JSON
//! serialization. Backends:
//!
//! - [`MemoryStore`]: process-local, for tests and ephemeral sessions
//! - [`FileStore`]: one file per key under a directory (native builds)
//! - `SpinStore`: Spin's Key-Value store (wasm32 only)
//!
//! # Example
//!
//! ```rust
//! use turbo_cache::{Cache, FileStore};
//!
//! let dir = std::env::temp_dir().join("turbo-cache-doc");
//! let cache = Cache::new(FileStore::open(&dir).unwrap());
//!
//! cache.set("cart:user123", &vec![1, 2, 3]).unwrap();
//! let cart: Option<Vec<i32>> = cache.get("cart:user123").unwrap();
//! assert_eq!(cart, Some(vec![1, 2, 3]));
//!
//! cache.delete("cart:user123").unwrap();
//! ```

mod error;
mod file;
mod kv;
mod memory;
#[cfg(target_arch = "wasm32")]
mod spin;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use spin::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
