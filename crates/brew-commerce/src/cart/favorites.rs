//! Favorite products.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// The set of products a customer has marked as favorite.
///
/// Stored as a list so the display keeps the order favorites were added in;
/// an id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorites {
    #[serde(default)]
    favorite_ids: Vec<ProductId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a possibly-duplicated list, keeping first occurrences.
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut favorites = Self::new();
        for id in ids {
            if !favorites.contains(&id) {
                favorites.favorite_ids.push(id);
            }
        }
        favorites
    }

    /// Remove `id` if present, add it otherwise. Returns the new membership.
    pub fn toggle(&mut self, id: &ProductId) -> bool {
        if let Some(pos) = self.favorite_ids.iter().position(|f| f == id) {
            self.favorite_ids.remove(pos);
            false
        } else {
            self.favorite_ids.push(id.clone());
            true
        }
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.favorite_ids.contains(id)
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.favorite_ids
    }

    pub fn len(&self) -> usize {
        self.favorite_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorite_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_toggle_on_and_off() {
        let mut favorites = Favorites::new();
        let cold_brew = ProductId::new("e-cold-brew");

        assert!(favorites.toggle(&cold_brew));
        assert!(favorites.contains(&cold_brew));

        assert!(!favorites.toggle(&cold_brew));
        assert!(!favorites.contains(&cold_brew));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut favorites = Favorites::new();
        favorites.toggle(&ProductId::new("cd-latte"));
        favorites.toggle(&ProductId::new("v-latte"));
        let ids: Vec<&str> = favorites.ids().iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["cd-latte", "v-latte"]);
    }

    #[test]
    fn test_from_ids_dedups() {
        let favorites = Favorites::from_ids(["a", "b", "a"].into_iter().map(ProductId::new));
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn test_persisted_shape() {
        let mut favorites = Favorites::new();
        favorites.toggle(&ProductId::new("e-cold-brew"));
        assert_eq!(
            serde_json::to_string(&favorites).unwrap(),
            r#"{"favoriteIds":["e-cold-brew"]}"#
        );
    }

    proptest! {
        #[test]
        fn prop_toggle_is_its_own_inverse(
            existing in proptest::collection::vec("[a-d]", 0..4),
            target in "[a-e]",
        ) {
            let mut favorites = Favorites::from_ids(existing.into_iter().map(ProductId::new));
            let id = ProductId::new(target);
            let before = favorites.clone();

            favorites.toggle(&id);
            prop_assert_ne!(favorites.contains(&id), before.contains(&id));
            favorites.toggle(&id);
            prop_assert_eq!(favorites.contains(&id), before.contains(&id));
        }
    }
}
