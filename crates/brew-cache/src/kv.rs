//! Key-Value cache wrapper with automatic serialization.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::store::{FileStore, KvStore, MemoryStore};
use crate::CacheError;

/// Type-safe cache over a [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning is cheap; clones share the
/// same backing store.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KvStore>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Open a directory-backed cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open("/home/me/.local/share/brewspot")?;
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let store = FileStore::open(dir)?;
        tracing::debug!(root = %store.root().display(), "opened file store");
        Ok(Self::with_store(store))
    }

    /// Create a cache that lives only as long as this process.
    pub fn in_memory() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Wrap an arbitrary store implementation.
    pub fn with_store(store: impl KvStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<CartState> = cache.get("brewspot-cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("brewspot-cart", &cart)?;
    /// ```
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
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
