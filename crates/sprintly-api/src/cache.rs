//! Item cache: the last successfully fetched product list.
//!
//! The cache is what makes `sprintly` usable offline; a failed refresh
//! renders whatever was fetched last.

use std::fs;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sprintly_core::Product;
use tracing::debug;

use crate::config::ConfigStore;
use crate::error::{ApiError, Result};

/// Cached product list with its refresh timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cache {
    pub updated_at: DateTime<Utc>,
    pub products: Vec<Product>,
}

impl Cache {
    /// Wrap a freshly fetched product list, stamped now.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            updated_at: Utc::now(),
            products,
        }
    }
}

impl ConfigStore {
    /// Read the cache.
    ///
    /// # Errors
    /// Returns `ApiError::InvalidCache` when the cache was never written or
    /// cannot be parsed.
    pub fn load_cache(&self) -> Result<Cache> {
        let path = self.cache_path();
        let content =
            fs::read_to_string(&path).map_err(|_| ApiError::InvalidCache(path.clone()))?;
        let cache =
            serde_json::from_str(&content).map_err(|_| ApiError::InvalidCache(path.clone()))?;
        debug!(path = %path.display(), "loaded cache");
        Ok(cache)
    }

    /// Persist the cache.
    ///
    /// # Errors
    /// Returns an error when serialization or the write fails.
    pub fn store_cache(&self, cache: &Cache) -> Result<()> {
        let content = serde_json::to_string(cache)?;
        fs::write(self.cache_path(), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sprintly_core::{Item, ItemStatus, ItemType};

    #[test]
    fn round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::open(dir.path().join(".sprintly")).unwrap();

        let cache = Cache::new(vec![Product {
            id: 1,
            name: "Widgets".to_owned(),
            items: vec![Item::new(
                10,
                ItemType::Story,
                ItemStatus::Backlog,
                "Add login",
            )],
        }]);

        store.store_cache(&cache).unwrap();
        let loaded = store.load_cache().unwrap();

        assert_eq!(loaded, cache);
    }

    #[test]
    fn missing_cache_is_an_invalid_cache_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::open(dir.path().join(".sprintly")).unwrap();

        assert!(matches!(
            store.load_cache(),
            Err(ApiError::InvalidCache(_))
        ));
    }

    #[test]
    fn garbage_cache_is_an_invalid_cache_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::open(dir.path().join(".sprintly")).unwrap();
        fs::write(store.cache_path(), "not json at all").unwrap();

        assert!(matches!(
            store.load_cache(),
            Err(ApiError::InvalidCache(_))
        ));
    }
}
