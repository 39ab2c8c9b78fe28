//! Persistence for store state.

use std::marker::PhantomData;

use brew_cache::Cache;
use serde::{de::DeserializeOwned, Serialize};

use crate::CommerceError;

/// Storage key for the cart.
pub const CART_KEY: &str = "brewspot-cart";

/// Storage key for favorites.
pub const FAVORITES_KEY: &str = "brewspot-favorites";

/// Loads a store's state at startup and saves it after each mutation.
pub trait Repository<S> {
    /// Read the last saved state, if any.
    fn load(&self) -> Result<Option<S>, CommerceError>;

    /// Replace the saved state.
    fn save(&self, state: &S) -> Result<(), CommerceError>;
}

/// Repository that keeps one JSON document under a fixed cache key.
pub struct CacheRepository<S> {
    cache: Cache,
    key: String,
    _state: PhantomData<fn() -> S>,
}

impl<S> CacheRepository<S> {
    pub fn new(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            _state: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S> Clone for CacheRepository<S> {
    fn clone(&self) -> Self {
        Self::new(self.cache.clone(), self.key.clone())
    }
}

impl<S> std::fmt::Debug for CacheRepository<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRepository")
            .field("key", &self.key)
            .finish()
    }
}

impl<S> Repository<S> for CacheRepository<S>
where
    S: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<S>, CommerceError> {
        Ok(self.cache.get(&self.key)?)
    }

    fn save(&self, state: &S) -> Result<(), CommerceError> {
        Ok(self.cache.set(&self.key, state)?)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use brew_cache::{CacheError, KvStore};

    /// Store whose writes always fail, for exercising warning paths.
    #[derive(Debug, Default)]
    pub struct ReadOnlyStore;

    impl KvStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &[u8]) -> Result<(), CacheError> {
            Err(CacheError::StoreError(format!("quota exceeded writing {}", key)))
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            Ok(vec![])
        }
    }
}
