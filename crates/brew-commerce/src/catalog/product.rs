//! Product types.

use crate::catalog::Category;
use crate::ids::ProductId;
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// A drink on the menu.
///
/// Products are read-only reference data. The cart snapshots the fields it
/// needs at add time instead of holding on to a `Product`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Menu description.
    pub description: String,
    /// Base price for a medium.
    #[serde(with = "money::as_decimal")]
    pub price: Money,
    /// Image URL.
    pub image: String,
    /// Menu section.
    pub category: Category,
    /// Calories for a medium.
    #[serde(default)]
    pub calories: u32,
    /// Preparation time range (e.g., "5-7 min").
    #[serde(default)]
    pub prep_time: String,
    /// Average rating out of 5.
    pub rating: f32,
    /// Number of reviews.
    pub reviews: u32,
    /// Highlighted as a best seller.
    #[serde(default)]
    pub best_seller: bool,
}

impl Product {
    /// Create a product with no calorie/prep metadata.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            category,
            calories: 0,
            prep_time: String::new(),
            rating: 0.0,
            reviews: 0,
            best_seller: false,
        }
    }

    /// Whether the name contains `query`, ignoring case.
    pub fn matches_query(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}
