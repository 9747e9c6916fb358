//! Type-safe key-value storage for the tailor storefront.
//!
//! [`Cache`] adds JSON serialization on top of a raw [`KvStore`]. Stores:
//!
//! - [`MemoryStore`] for tests and in-process state
//! - [`FileStore`], one JSON file per key, for the command-line tools
//! - `SpinStore`, Spin's key-value store, when built for `wasm32`
//!
//! # Example
//!
//! ```
//! use tailor_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cart-items", &vec![1, 2, 3]).unwrap();
//! let items: Vec<i32> = cache.get_or_default("cart-items").unwrap();
//! assert_eq!(items, vec![1, 2, 3]);
//! cache.delete("cart-items").unwrap();
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
#[cfg(target_arch = "wasm32")]
pub use store::SpinStore;
pub use store::{FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
