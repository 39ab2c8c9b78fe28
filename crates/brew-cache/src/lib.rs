//! Durable Key-Value storage for BrewSpot.
//!
//! Provides a simple, ergonomic API for keeping small pieces of state (the
//! cart, the favorites list) across application restarts, with automatic
//! JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use brew_cache::Cache;
//!
//! let cache = Cache::open("/var/lib/brewspot")?;
//!
//! // Store a value
//! cache.set("brewspot-cart", &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<CartState> = cache.get("brewspot-cart")?;
//!
//! // Delete a value
//! cache.delete("brewspot-cart")?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KvStore};
}
