//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use brew_cache::Cache;
use brew_commerce::cart::{Cart, Favorites};
use brew_commerce::catalog::Catalog;
use brew_commerce::rewards::RewardsAccount;
use brew_commerce::store::{CacheRepository, CartStore, FavoritesStore, CART_KEY, FAVORITES_KEY};

use crate::config::{BrewConfig, CONFIG_NAMES};
use crate::output::Output;

pub type CliCartStore = CartStore<CacheRepository<Cart>>;
pub type CliFavoritesStore = FavoritesStore<CacheRepository<Favorites>>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: BrewConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

/// Everything a command can touch, opened once per process.
pub struct Storefront {
    pub catalog: Catalog,
    pub cart: CliCartStore,
    pub favorites: CliFavoritesStore,
}

impl Storefront {
    /// Write back anything a failed save left behind.
    pub fn flush(&mut self) -> Result<()> {
        if self.cart.has_unsaved_changes() {
            self.cart.flush().context("Failed to save cart")?;
        }
        if self.favorites.has_unsaved_changes() {
            self.favorites.flush().context("Failed to save favorites")?;
        }
        Ok(())
    }
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (BrewConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd)? {
                Some(path) => {
                    let config = BrewConfig::load(&path.to_string_lossy())?;
                    (config, Some(path))
                }
                None => (BrewConfig::default(), None),
            }
        };

        if let Some(ref path) = config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Result<Option<PathBuf>> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Ok(Some(config_path));
                }
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Directory relative config paths are resolved against.
    fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_ref()
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a path relative to the config directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir().join(path)
        }
    }

    /// Get the storage directory.
    pub fn storage_dir(&self) -> PathBuf {
        match self.config.storage.dir {
            Some(ref dir) => self.resolve_path(dir),
            None => dirs_path().join("brewspot"),
        }
    }

    /// Load the menu.
    pub fn catalog(&self) -> Result<Catalog> {
        match self.config.catalog.path {
            Some(ref path) => {
                let path = self.resolve_path(path);
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read menu: {}", path.display()))?;
                Catalog::from_json(&json)
                    .with_context(|| format!("Failed to parse menu: {}", path.display()))
            }
            None => Ok(Catalog::builtin()),
        }
    }

    /// Loyalty balance from config.
    pub fn rewards(&self) -> RewardsAccount {
        RewardsAccount::new(self.config.rewards.points, self.config.rewards.next_reward)
    }

    /// Open the stores and the menu.
    pub fn open_storefront(&self) -> Result<Storefront> {
        let dir = self.storage_dir();
        let cache = Cache::open(&dir)
            .with_context(|| format!("Failed to open storage: {}", dir.display()))?;
        tracing::debug!(dir = %dir.display(), "opened storage");

        Ok(Storefront {
            catalog: self.catalog()?,
            cart: CartStore::load(CacheRepository::new(cache.clone(), CART_KEY)),
            favorites: FavoritesStore::load(CacheRepository::new(cache, FAVORITES_KEY)),
        })
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
