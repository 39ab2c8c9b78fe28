//! Drink customization and its effect on price.

use crate::cart::LineItemInput;
use crate::catalog::Product;
use crate::money::Money;
use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cup size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Size {
    S,
    #[default]
    M,
    L,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::S, Size::M, Size::L];

    /// Price adjustment relative to the menu price (which is for a medium).
    pub fn surcharge(&self) -> Money {
        match self {
            Size::S => Money::usd(-50),
            Size::M => Money::usd(0),
            Size::L => Money::usd(75),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
        }
    }
}

impl FromStr for Size {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "S" | "SMALL" => Ok(Size::S),
            "M" | "MEDIUM" => Ok(Size::M),
            "L" | "LARGE" => Ok(Size::L),
            _ => Err(CommerceError::ValidationError(format!(
                "unknown size '{}', expected S, M or L",
                s
            ))),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Milk choices offered on the customization screen.
pub const MILK_OPTIONS: [&str; 4] = ["Whole Milk", "Oat Milk", "Almond Milk", "Soy Milk"];

/// Milk used when the customer does not pick one.
pub const DEFAULT_MILK: &str = "Whole Milk";

/// An optional extra with a flat price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addon {
    pub id: &'static str,
    pub name: &'static str,
    pub price: Money,
}

/// Add-ons offered on the customization screen.
pub const ADDONS: [Addon; 4] = [
    Addon {
        id: "syrup",
        name: "Vanilla Syrup",
        price: Money::usd(50),
    },
    Addon {
        id: "caramel",
        name: "Caramel Drizzle",
        price: Money::usd(75),
    },
    Addon {
        id: "oat",
        name: "Extra Shot",
        price: Money::usd(100),
    },
    Addon {
        id: "cream",
        name: "Whipped Cream",
        price: Money::usd(40),
    },
];

/// Look up an add-on by id.
pub fn find_addon(id: &str) -> Option<&'static Addon> {
    ADDONS.iter().find(|a| a.id == id)
}

/// A customer's choices for one drink.
///
/// Add-ons keep the order in which they were picked; the cart compares them
/// as a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    pub size: Size,
    pub milk: String,
    pub addons: Vec<String>,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            size: Size::M,
            milk: DEFAULT_MILK.to_string(),
            addons: Vec::new(),
        }
    }
}

impl Customization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_milk(mut self, milk: impl Into<String>) -> Self {
        self.milk = milk.into();
        self
    }

    pub fn with_addon(mut self, addon: impl Into<String>) -> Self {
        let addon = addon.into();
        if !self.addons.contains(&addon) {
            self.addons.push(addon);
        }
        self
    }

    /// Select the add-on if unselected, otherwise deselect it.
    pub fn toggle_addon(&mut self, addon: &str) {
        if let Some(pos) = self.addons.iter().position(|a| a == addon) {
            self.addons.remove(pos);
        } else {
            self.addons.push(addon.to_string());
        }
    }

    /// Reject milks and add-ons the menu does not offer.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !MILK_OPTIONS.contains(&self.milk.as_str()) {
            return Err(CommerceError::ValidationError(format!(
                "unknown milk: {}",
                self.milk
            )));
        }
        if let Some(unknown) = self.addons.iter().find(|a| find_addon(a).is_none()) {
            return Err(CommerceError::ValidationError(format!(
                "unknown add-on: {}",
                unknown
            )));
        }
        Ok(())
    }

    /// Unit price of `product` with these choices.
    ///
    /// Unknown add-on ids contribute nothing.
    pub fn unit_price(&self, product: &Product) -> Money {
        self.addons
            .iter()
            .filter_map(|id| find_addon(id))
            .fold(product.price + self.size.surcharge(), |total, addon| {
                total + addon.price
            })
    }

    /// Build the cart input for `quantity` of `product` with these choices.
    pub fn line_item(&self, product: &Product, quantity: i64) -> LineItemInput {
        LineItemInput {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: self.unit_price(product),
            image: product.image.clone(),
            quantity,
            size: self.size,
            milk: self.milk.clone(),
            addons: self.addons.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::ids::ProductId;

    fn latte() -> Product {
        Catalog::builtin()
            .get(&ProductId::new("v-latte"))
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_default_is_medium_whole_milk() {
        let c = Customization::new();
        assert_eq!(c.size, Size::M);
        assert_eq!(c.milk, "Whole Milk");
        assert_eq!(c.unit_price(&latte()), Money::usd(550));
    }

    #[test]
    fn test_size_surcharges() {
        let product = latte();
        assert_eq!(
            Customization::new().with_size(Size::S).unit_price(&product),
            Money::usd(500)
        );
        assert_eq!(
            Customization::new().with_size(Size::L).unit_price(&product),
            Money::usd(625)
        );
    }

    #[test]
    fn test_addons_add_up() {
        let price = Customization::new()
            .with_size(Size::L)
            .with_addon("syrup")
            .with_addon("cream")
            .unit_price(&latte());
        // 5.50 + 0.75 + 0.50 + 0.40
        assert_eq!(price, Money::usd(715));
    }

    #[test]
    fn test_unknown_addon_is_free_but_invalid() {
        let c = Customization::new().with_addon("gold-leaf");
        assert_eq!(c.unit_price(&latte()), Money::usd(550));
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_toggle_addon() {
        let mut c = Customization::new();
        c.toggle_addon("syrup");
        c.toggle_addon("oat");
        assert_eq!(c.addons, vec!["syrup", "oat"]);
        c.toggle_addon("syrup");
        assert_eq!(c.addons, vec!["oat"]);
    }

    #[test]
    fn test_line_item_snapshots_product() {
        let input = Customization::new()
            .with_milk("Oat Milk")
            .with_addon("syrup")
            .line_item(&latte(), 2);
        assert_eq!(input.product_id.as_str(), "v-latte");
        assert_eq!(input.name, "Vanilla Oat Latte");
        assert_eq!(input.price, Money::usd(600));
        assert_eq!(input.quantity, 2);
        assert_eq!(input.milk, "Oat Milk");
    }

    #[test]
    fn test_size_parse() {
        assert_eq!("l".parse::<Size>().unwrap(), Size::L);
        assert_eq!("Small".parse::<Size>().unwrap(), Size::S);
    }

    #[test]
    fn test_size_parse_unknown() {
        let err = "XL".parse::<Size>().unwrap_err();
        assert!(matches!(err, CommerceError::ValidationError(_)));
        assert!(err.to_string().contains("expected S, M or L"));
    }
}
