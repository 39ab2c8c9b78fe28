//! The menu: the full list of products plus browsing filters.

use crate::catalog::{Category, Product};
use crate::ids::ProductId;
use crate::money::Money;
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Browsing filter for the menu.
///
/// An absent category means "All". The query matches product names as a
/// case-insensitive substring; an empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuFilter {
    pub category: Option<Category>,
    pub query: String,
}

impl MenuFilter {
    /// Match everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Restrict by name.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self.category.map_or(true, |c| product.category == c);
        category_ok && product.matches_query(&self.query)
    }
}

/// Read-only product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = std::collections::HashSet::new();
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CommerceError::ValidationError(format!(
                    "duplicate product id: {}",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The house menu.
    pub fn builtin() -> Self {
        let products = vec![
            Product {
                description: "Smooth espresso poured over creamy oat milk with a hint of Madagascar vanilla bean.".to_string(),
                image: "images/vanilla-oat-latte.jpg".to_string(),
                calories: 190,
                prep_time: "5-7 min".to_string(),
                rating: 4.8,
                reviews: 120,
                best_seller: true,
                ..Product::new("v-latte", "Vanilla Oat Latte", Money::usd(550), Category::Hot)
            },
            Product {
                description: "Slow-steeped for 18 hours, featuring floral notes and a bright citrus finish.".to_string(),
                image: "images/ethiopian-cold-brew.jpg".to_string(),
                calories: 5,
                prep_time: "2-3 min".to_string(),
                rating: 5.0,
                reviews: 85,
                ..Product::new("e-cold-brew", "Ethiopian Cold Brew", Money::usd(475), Category::Iced)
            },
            Product {
                description: "Freshly steamed milk marked with espresso, vanilla, and real caramel drizzle.".to_string(),
                image: "images/caramel-macchiato.jpg".to_string(),
                calories: 250,
                prep_time: "4-6 min".to_string(),
                rating: 4.5,
                reviews: 215,
                ..Product::new("c-macchiato", "Caramel Macchiato", Money::usd(600), Category::Hot)
            },
            Product {
                description: "Extra spicy and sweet seasonal favorite with a cinnamon sugar topping.".to_string(),
                image: "images/cinnamon-dolce-latte.jpg".to_string(),
                calories: 330,
                prep_time: "6-8 min".to_string(),
                rating: 4.9,
                reviews: 342,
                ..Product::new("cd-latte", "Cinnamon Dolce Latte", Money::usd(625), Category::Seasonal)
            },
        ];
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a product by id, failing with `ProductNotFound`.
    pub fn require(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Products matching a filter, in menu order.
    pub fn filter(&self, filter: &MenuFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    pub fn best_sellers(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.best_seller).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_menu() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 4);
        let latte = catalog.get(&ProductId::new("v-latte")).unwrap();
        assert_eq!(latte.price, Money::usd(550));
        assert_eq!(catalog.best_sellers().len(), 1);
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = Catalog::builtin();
        let hot = catalog.filter(&MenuFilter::all().category(Category::Hot));
        let ids: Vec<&str> = hot.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["v-latte", "c-macchiato"]);
    }

    #[test]
    fn test_filter_by_query_and_category() {
        let catalog = Catalog::builtin();
        let lattes = catalog.filter(&MenuFilter::all().query("latte"));
        assert_eq!(lattes.len(), 2);

        let seasonal_lattes =
            catalog.filter(&MenuFilter::all().query("latte").category(Category::Seasonal));
        assert_eq!(seasonal_lattes.len(), 1);
        assert_eq!(seasonal_lattes[0].id.as_str(), "cd-latte");

        assert!(catalog.filter(&MenuFilter::all().query("matcha")).is_empty());
    }

    #[test]
    fn test_require_missing_product() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            catalog.require(&ProductId::new("nope")),
            Err(CommerceError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let json = r#"[
            {"id":"a","name":"A","description":"","price":1.0,"image":"","category":"Hot","rating":4.0,"reviews":1},
            {"id":"a","name":"B","description":"","price":2.0,"image":"","category":"Iced","rating":4.0,"reviews":1}
        ]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CommerceError::ValidationError(_))
        ));
    }
}
