//! Typed wrapper over a [`KvStore`] with JSON serialization.

use crate::store::KvStore;
use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over any [`KvStore`].
///
/// Values are stored as JSON, so anything that implements `Serialize` and
/// `DeserializeOwned` can be cached.
#[derive(Debug)]
pub struct Cache<S> {
    store: S,
}

impl<S: KvStore> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```
    /// use tailor_cache::{Cache, MemoryStore};
    ///
    /// let cache = Cache::new(MemoryStore::new());
    /// cache.set("greeting", &"namaste").unwrap();
    /// let value: Option<String> = cache.get("greeting").unwrap();
    /// assert_eq!(value.as_deref(), Some("namaste"));
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Get a value, falling back to `T::default()` when the key is missing.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, CacheError> {
        Ok(self.get(key)?.unwrap_or_default())
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```
/// use tailor_cache::cache_key;
///
/// let key = cache_key!("bill", 42);
/// assert_eq!(key, "bill:42");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Line {
        product: u64,
        pcs: i64,
    }

    #[test]
    fn test_typed_round_trip() {
        let cache = Cache::new(MemoryStore::new());
        let lines = vec![Line { product: 1, pcs: 2 }];
        cache.set("cart-items", &lines).unwrap();
        let back: Vec<Line> = cache.get("cart-items").unwrap().unwrap();
        assert_eq!(back, lines);
    }

    #[test]
    fn test_get_or_default() {
        let cache = Cache::new(MemoryStore::new());
        let lines: Vec<Line> = cache.get_or_default("cart-items").unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_corrupt_value_is_an_error() {
        let cache = Cache::new(MemoryStore::new());
        cache.store().set("cart-items", b"not json").unwrap();
        let result: Result<Option<Vec<Line>>, _> = cache.get("cart-items");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key!("session", "default", 3), "session:default:3");
    }
}
