//! Cart and line item types.

use crate::cart::Size;
use crate::error::CommerceError;
use crate::ids::{LineItemId, ProductId};
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What the customization screen hands to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemInput {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price including customization surcharges.
    pub price: Money,
    pub image: String,
    pub quantity: i64,
    pub size: Size,
    pub milk: String,
    pub addons: Vec<String>,
}

impl LineItemInput {
    /// Check the caller-side contract: quantity ≥ 1, price ≥ 0, a milk.
    ///
    /// The cart itself does not call this; it stores what it is given.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.quantity < 1 {
            return Err(CommerceError::ValidationError(format!(
                "quantity must be at least 1, got {}",
                self.quantity
            )));
        }
        if self.price.is_negative() {
            return Err(CommerceError::ValidationError(format!(
                "price must not be negative, got {}",
                self.price
            )));
        }
        if self.milk.trim().is_empty() {
            return Err(CommerceError::ValidationError(
                "milk must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique line item identifier, independent of the product id.
    pub id: LineItemId,
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price snapshot taken when the line was created.
    #[serde(with = "money::as_decimal")]
    pub price: Money,
    pub image: String,
    pub quantity: i64,
    pub size: Size,
    pub milk: String,
    pub addons: Vec<String>,
}

impl LineItem {
    fn from_input(input: LineItemInput) -> Self {
        Self {
            id: LineItemId::generate(),
            product_id: input.product_id,
            name: input.name,
            price: input.price,
            image: input.image,
            quantity: input.quantity,
            size: input.size,
            milk: input.milk,
            addons: input.addons,
        }
    }

    /// `price × quantity`.
    pub fn subtotal(&self) -> Money {
        self.price.saturating_multiply(self.quantity)
    }

    /// Same product with the same size, milk and add-on set.
    pub fn same_customization(&self, input: &LineItemInput) -> bool {
        self.product_id == input.product_id
            && self.size == input.size
            && self.milk == input.milk
            && addon_set(&self.addons) == addon_set(&input.addons)
    }
}

fn addon_set(addons: &[String]) -> BTreeSet<&str> {
    addons.iter().map(String::as_str).collect()
}

/// The shopping cart.
///
/// Items are kept in insertion order, which is also display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    #[serde(default)]
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to the cart.
    ///
    /// If a line with the same customization exists, its quantity grows by
    /// the candidate's quantity and its stored unit price is kept. Otherwise
    /// a new line with a fresh id is appended. Returns the affected line id.
    pub fn add_item(&mut self, input: LineItemInput) -> LineItemId {
        if let Some(existing) = self.items.iter_mut().find(|i| i.same_customization(&input)) {
            existing.quantity = existing.quantity.saturating_add(input.quantity);
            return existing.id.clone();
        }

        let item = LineItem::from_input(input);
        let id = item.id.clone();
        self.items.push(item);
        id
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        self.items.len() < len_before
    }

    /// Set a line's quantity.
    ///
    /// Quantities are clamped to a floor of 0, and a line whose quantity
    /// reaches 0 is removed. Returns whether the line existed.
    pub fn update_quantity(&mut self, line_item_id: &LineItemId, quantity: i64) -> bool {
        let quantity = quantity.max(0);
        if quantity == 0 {
            return self.remove_item(line_item_id);
        }

        match self.items.iter_mut().find(|i| &i.id == line_item_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price × quantity` over the current items.
    pub fn total(&self) -> Money {
        let cents = self
            .items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.subtotal().amount_cents));
        Money::usd(cents)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, line_item_id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == line_item_id)
    }

    /// Find a line by id prefix, as typed by a person reading a listing.
    ///
    /// Empty and ambiguous prefixes are rejected.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&LineItem, CommerceError> {
        if prefix.is_empty() {
            return Err(CommerceError::ValidationError(
                "line id prefix must not be empty".to_string(),
            ));
        }
        let mut matches = self.items.iter().filter(|i| i.id.as_str().starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(item), None) => Ok(item),
            (Some(_), _) => Err(CommerceError::ValidationError(format!(
                "line id prefix '{}' is ambiguous",
                prefix
            ))),
            (None, _) => Err(CommerceError::ItemNotInCart(prefix.to_string())),
        }
    }
}
