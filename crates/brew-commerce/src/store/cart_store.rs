//! The cart store: single owner of the cart state.

use crate::cart::{Cart, LineItem, LineItemInput};
use crate::ids::LineItemId;
use crate::money::Money;
use crate::store::Repository;
use crate::CommerceError;

/// Owns the cart and persists it after every mutation.
///
/// Mutations never fail. A failed save is logged and remembered; the
/// in-memory cart stays authoritative and the next successful save (or an
/// explicit [`CartStore::flush`]) catches storage up.
#[derive(Debug)]
pub struct CartStore<R> {
    cart: Cart,
    repo: R,
    dirty: bool,
}

impl<R: Repository<Cart>> CartStore<R> {
    /// Load the saved cart, starting empty when nothing is saved or the
    /// saved copy cannot be read.
    pub fn load(repo: R) -> Self {
        let cart = match repo.load() {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not load saved cart, starting empty");
                Cart::new()
            }
        };
        tracing::debug!(lines = cart.unique_item_count(), "cart store loaded");
        Self {
            cart,
            repo,
            dirty: false,
        }
    }

    /// Add an item, merging with an identically customized line.
    pub fn add_item(&mut self, input: LineItemInput) -> LineItemId {
        let product_id = input.product_id.clone();
        let id = self.cart.add_item(input);
        tracing::debug!(line_item = %id, product = %product_id, "added to cart");
        self.persist();
        id
    }

    /// Remove a line; absent ids are ignored.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let removed = self.cart.remove_item(line_item_id);
        if removed {
            tracing::debug!(line_item = %line_item_id, "removed from cart");
        }
        self.persist();
        removed
    }

    /// Set a line's quantity; 0 or less removes the line.
    pub fn update_quantity(&mut self, line_item_id: &LineItemId, quantity: i64) -> bool {
        let found = self.cart.update_quantity(line_item_id, quantity);
        tracing::debug!(line_item = %line_item_id, quantity, found, "updated quantity");
        self.persist();
        found
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        tracing::debug!("cart cleared");
        self.persist();
    }

    /// Sum of `price × quantity` over the current items.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn get_item(&self, line_item_id: &LineItemId) -> Option<&LineItem> {
        self.cart.get_item(line_item_id)
    }

    /// Whether the last save attempt failed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Save now, reporting failure to the caller.
    pub fn flush(&mut self) -> Result<(), CommerceError> {
        self.repo.save(&self.cart)?;
        self.dirty = false;
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "failed to persist cart");
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Customization, Size};
    use crate::catalog::Catalog;
    use crate::ids::ProductId;
    use crate::store::repository::testing::ReadOnlyStore;
    use crate::store::{CacheRepository, CART_KEY};
    use brew_cache::Cache;

    fn open_store(cache: &Cache) -> CartStore<CacheRepository<Cart>> {
        CartStore::load(CacheRepository::new(cache.clone(), CART_KEY))
    }

    fn latte(customization: &Customization) -> LineItemInput {
        let catalog = Catalog::builtin();
        let product = catalog.get(&ProductId::new("v-latte")).unwrap();
        customization.line_item(product, 1)
    }

    #[test]
    fn test_scenario_same_latte_twice() {
        let mut store = open_store(&Cache::in_memory());
        store.add_item(latte(&Customization::new()));
        store.add_item(latte(&Customization::new()));

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 2);
        assert_eq!(store.total(), Money::usd(1100));
    }

    #[test]
    fn test_scenario_two_customizations() {
        let mut store = open_store(&Cache::in_memory());
        store.add_item(latte(&Customization::new().with_addon("syrup")));
        store.add_item(latte(&Customization::new().with_size(Size::L)));

        assert_eq!(store.items().len(), 2);
        assert_eq!(store.total(), Money::usd(1225));
    }

    #[test]
    fn test_mutations_are_persisted() {
        let cache = Cache::in_memory();
        let id = {
            let mut store = open_store(&cache);
            let id = store.add_item(latte(&Customization::new()));
            store.update_quantity(&id, 3);
            id
        };

        let reloaded = open_store(&cache);
        assert_eq!(reloaded.get_item(&id).map(|i| i.quantity), Some(3));
        assert_eq!(reloaded.total(), Money::usd(1650));
    }

    #[test]
    fn test_persisted_json_under_cart_key() {
        let cache = Cache::in_memory();
        let mut store = open_store(&cache);
        store.add_item(latte(&Customization::new()));

        let raw: serde_json::Value = cache.get(CART_KEY).unwrap().unwrap();
        assert_eq!(raw["items"][0]["productId"], "v-latte");
        assert_eq!(raw["items"][0]["quantity"], 1);
    }

    #[test]
    fn test_clear_is_persisted() {
        let cache = Cache::in_memory();
        let mut store = open_store(&cache);
        store.add_item(latte(&Customization::new()));
        store.clear_cart();

        assert!(open_store(&cache).is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = open_store(&Cache::in_memory());
        store.add_item(latte(&Customization::new()));
        assert!(!store.remove_item(&LineItemId::new("missing")));
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_corrupt_saved_cart_starts_empty() {
        let cache = Cache::in_memory();
        cache.set(CART_KEY, &serde_json::json!({"items": "not a list"})).unwrap();
        assert!(open_store(&cache).is_empty());
    }

    #[test]
    fn test_storage_failure_does_not_fail_mutation() {
        let repo = CacheRepository::new(Cache::with_store(ReadOnlyStore), CART_KEY);
        let mut store = CartStore::load(repo);

        store.add_item(latte(&Customization::new()));
        assert_eq!(store.item_count(), 1);
        assert!(store.has_unsaved_changes());
        assert!(store.flush().is_err());
    }
}
