//! Storefront domain types and state for BrewSpot.
//!
//! This crate holds everything the storefront keeps track of:
//!
//! - **Catalog**: the coffee menu, categories, filtering
//! - **Cart**: line items with customizations, merge rules, totals, favorites
//! - **Store**: persisted cart and favorites stores
//! - **Checkout**: shipping → payment → confirmed, with async settlement
//! - **Rewards**: loyalty points and reward tiers
//!
//! # Example
//!
//! ```rust,ignore
//! use brew_commerce::prelude::*;
//!
//! let cache = brew_cache::Cache::open("~/.local/share/brewspot")?;
//! let mut cart = CartStore::load(CacheRepository::new(cache, CART_KEY));
//!
//! let catalog = Catalog::builtin();
//! let latte = catalog.require(&ProductId::new("v-latte"))?;
//! cart.add_item(Customization::new().with_size(Size::L).line_item(latte, 2));
//!
//! println!("Total: {}", cart.total());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod rewards;
pub mod store;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, Category, MenuFilter, Product};

    // Cart
    pub use crate::cart::{
        Addon, Cart, Customization, Favorites, LineItem, LineItemInput, Size, ADDONS, MILK_OPTIONS,
    };

    // Stores
    pub use crate::store::{
        CacheRepository, CartStore, FavoritesStore, Repository, CART_KEY, FAVORITES_KEY,
    };

    // Checkout
    pub use crate::checkout::{
        CancellationToken, CheckoutFlow, CheckoutStep, OrderConfirmation, PaymentDetails,
        PaymentGateway, ShippingDetails, SimulatedGateway,
    };

    // Rewards
    pub use crate::rewards::{Reward, RewardsAccount, REWARDS};
}
