//! Shopping cart module.
//!
//! Contains the cart and its line items, drink customization pricing, and
//! the favorites set.

mod cart;
mod customization;
mod favorites;

pub use cart::{Cart, LineItem, LineItemInput};
pub use customization::{find_addon, Addon, Customization, Size, ADDONS, DEFAULT_MILK, MILK_OPTIONS};
pub use favorites::Favorites;
