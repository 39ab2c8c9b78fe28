//! Catalog module.
//!
//! Contains the read-only menu: products, categories and browsing filters.

mod category;
mod menu;
mod product;

pub use category::Category;
pub use menu::{Catalog, MenuFilter};
pub use product::Product;
