//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Required checkout fields are missing or malformed.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// A settlement attempt is already running for this checkout.
    #[error("Settlement already in progress")]
    SettlementInProgress,

    /// Checkout cannot settle an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The payment gateway declined or failed.
    #[error("Settlement failed: {0}")]
    SettlementFailed(String),

    /// Settlement was cancelled before it completed.
    #[error("Settlement cancelled")]
    SettlementCancelled,

    /// Settlement did not complete in time.
    #[error("Settlement timed out after {0:?}")]
    SettlementTimedOut(std::time::Duration),

    /// Not enough loyalty points for a reward.
    #[error("Insufficient points for {reward}: need {required}, have {available}")]
    InsufficientPoints {
        reward: String,
        required: u32,
        available: u32,
    },

    /// Unknown reward.
    #[error("Reward not found: {0}")]
    RewardNotFound(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<brew_cache::CacheError> for CommerceError {
    fn from(e: brew_cache::CacheError) -> Self {
        CommerceError::StorageError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
