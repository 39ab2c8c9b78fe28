//! Storage backends for the cache.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::CacheError;

/// A raw byte-oriented Key-Value store.
///
/// Implementations must be safe to share between threads; the cache hands
/// out clones backed by the same store.
pub trait KvStore: Send + Sync {
    /// Read the bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Replace the bytes stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    /// List every stored key.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// Process-local store. Contents are lost when the last handle is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| CacheError::StoreError(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CacheError::StoreError(e.to_string()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CacheError::StoreError(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| CacheError::StoreError(e.to_string()))?;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Directory-backed store: one `<key>.json` file per key.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

const FILE_EXTENSION: &str = "json";

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    /// Directory holding the store files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, FILE_EXTENSION)))
    }
}

fn validate_key(key: &str) -> Result<(), CacheError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
    if valid {
        Ok(())
    } else {
        Err(CacheError::InvalidKey(key.to_string()))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CacheError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension(format!("{}.tmp", FILE_EXTENSION));
        let io_err = |source| CacheError::Io {
            key: key.to_string(),
            source,
        };
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CacheError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(key)?.is_file())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = fs::read_dir(&self.root).map_err(|source| CacheError::Io {
            key: self.root.display().to_string(),
            source,
        })?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| CacheError::Io {
                key: self.root.display().to_string(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("brew-cache-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        store.set("a", b"1").unwrap();
        assert_eq!(store.get("a").unwrap(), Some(b"1".to_vec()));
        assert!(store.exists("a").unwrap());

        store.delete("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert!(!store.exists("a").unwrap());
    }

    #[test]
    fn test_memory_store_keys_sorted() {
        let store = MemoryStore::new();
        store.set("b", b"2").unwrap();
        store.set("a", b"1").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_file_store_persists_across_handles() {
        let root = temp_root();
        {
            let store = FileStore::open(&root).unwrap();
            store.set("brewspot-cart", br#"{"items":[]}"#).unwrap();
        }

        let reopened = FileStore::open(&root).unwrap();
        assert_eq!(
            reopened.get("brewspot-cart").unwrap(),
            Some(br#"{"items":[]}"#.to_vec())
        );
        assert_eq!(reopened.keys().unwrap(), vec!["brewspot-cart"]);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_file_store_missing_key() {
        let root = temp_root();
        let store = FileStore::open(&root).unwrap();
        assert_eq!(store.get("nothing-here").unwrap(), None);
        store.delete("nothing-here").unwrap();
        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let root = temp_root();
        let store = FileStore::open(&root).unwrap();
        assert!(matches!(
            store.set("../escape", b"x"),
            Err(CacheError::InvalidKey(_))
        ));
        assert!(matches!(store.get("a/b"), Err(CacheError::InvalidKey(_))));
        assert!(matches!(store.get(""), Err(CacheError::InvalidKey(_))));
        fs::remove_dir_all(&root).unwrap();
    }
}
