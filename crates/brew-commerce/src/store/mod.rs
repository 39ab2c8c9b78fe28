//! Stateful stores.
//!
//! Each store owns one piece of state, is created once by the application's
//! root and passed by reference to whatever needs it. There are no global
//! instances.

mod cart_store;
mod favorites_store;
pub(crate) mod repository;

pub use cart_store::CartStore;
pub use favorites_store::FavoritesStore;
pub use repository::{CacheRepository, Repository, CART_KEY, FAVORITES_KEY};
