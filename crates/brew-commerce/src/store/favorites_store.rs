//! The favorites store: single owner of the favorites set.

use crate::cart::Favorites;
use crate::ids::ProductId;
use crate::store::Repository;
use crate::CommerceError;

/// Owns the favorites set and persists it after every toggle.
#[derive(Debug)]
pub struct FavoritesStore<R> {
    favorites: Favorites,
    repo: R,
    dirty: bool,
}

impl<R: Repository<Favorites>> FavoritesStore<R> {
    pub fn load(repo: R) -> Self {
        let favorites = match repo.load() {
            // Re-normalize in case the saved list was edited by hand.
            Ok(Some(saved)) => Favorites::from_ids(saved.ids().iter().cloned()),
            Ok(None) => Favorites::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not load saved favorites, starting empty");
                Favorites::new()
            }
        };
        Self {
            favorites,
            repo,
            dirty: false,
        }
    }

    /// Flip membership of `product_id`. Returns the new membership.
    pub fn toggle_favorite(&mut self, product_id: &ProductId) -> bool {
        let now_favorite = self.favorites.toggle(product_id);
        tracing::debug!(product = %product_id, favorite = now_favorite, "toggled favorite");
        self.persist();
        now_favorite
    }

    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.favorites.contains(product_id)
    }

    pub fn favorite_ids(&self) -> &[ProductId] {
        self.favorites.ids()
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    pub fn flush(&mut self) -> Result<(), CommerceError> {
        self.repo.save(&self.favorites)?;
        self.dirty = false;
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "failed to persist favorites");
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::repository::testing::ReadOnlyStore;
    use crate::store::{CacheRepository, FAVORITES_KEY};
    use brew_cache::Cache;

    fn store(cache: &Cache) -> FavoritesStore<CacheRepository<Favorites>> {
        FavoritesStore::load(CacheRepository::new(cache.clone(), FAVORITES_KEY))
    }

    #[test]
    fn test_scenario_toggle_cold_brew() {
        let mut store = store(&Cache::in_memory());
        let cold_brew = ProductId::new("e-cold-brew");

        store.toggle_favorite(&cold_brew);
        assert!(store.is_favorite(&cold_brew));

        store.toggle_favorite(&cold_brew);
        assert!(!store.is_favorite(&cold_brew));
    }

    #[test]
    fn test_toggle_is_persisted() {
        let cache = Cache::in_memory();
        store(&cache).toggle_favorite(&ProductId::new("cd-latte"));

        let reloaded = store(&cache);
        assert!(reloaded.is_favorite(&ProductId::new("cd-latte")));
        assert_eq!(reloaded.len(), 1);

        let raw: serde_json::Value = cache.get(FAVORITES_KEY).unwrap().unwrap();
        assert_eq!(raw, serde_json::json!({"favoriteIds": ["cd-latte"]}));
    }

    #[test]
    fn test_duplicate_saved_ids_collapse() {
        let cache = Cache::in_memory();
        cache
            .set(FAVORITES_KEY, &serde_json::json!({"favoriteIds": ["a", "a", "b"]}))
            .unwrap();
        assert_eq!(store(&cache).len(), 2);
    }

    #[test]
    fn test_storage_failure_keeps_toggle() {
        let repo = CacheRepository::new(Cache::with_store(ReadOnlyStore), FAVORITES_KEY);
        let mut store = FavoritesStore::load(repo);
        assert!(store.toggle_favorite(&ProductId::new("v-latte")));
        assert!(store.is_favorite(&ProductId::new("v-latte")));
        assert!(store.has_unsaved_changes());
    }
}
