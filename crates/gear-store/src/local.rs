//! Local JSON-document cart store.
//!
//! The durability mechanism for guest sessions: one well-known file holding
//! a JSON array of line items. Reads tolerate a missing file; writes go
//! through a temp file and rename so a crash never leaves a half-written
//! cart.

use crate::{CartStore, StoreError};
use async_trait::async_trait;
use gear_commerce::cart::LineItem;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the cart document inside the storage directory.
const CART_FILE: &str = "cart.json";

/// File-backed cart store for guest sessions.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(CART_FILE),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(&self) -> Result<Option<Vec<LineItem>>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let items: Vec<LineItem> = serde_json::from_slice(&bytes)?;
        Ok(Some(items))
    }

    fn write_items(&self, items: &[LineItem]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(items)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl CartStore for LocalStore {
    async fn load(&self) -> Result<Option<Vec<LineItem>>, StoreError> {
        self.read_items()
    }

    async fn save(&self, items: &[LineItem]) -> Result<(), StoreError> {
        self.write_items(items)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        // An explicit empty document, not a deleted file: the next load must
        // see a cleared cart, not an untouched first run.
        self.write_items(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_commerce::catalog::ProductSnapshot;
    use gear_commerce::money::{Currency, Money};

    fn item() -> LineItem {
        let p = ProductSnapshot::new("hs-cloud", "Gaming Headset", Money::new(990_000, Currency::VND));
        LineItem::new(&p, Some("red".into()), 2)
    }

    #[tokio::test]
    async fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        store.save(&[item()]).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, vec![item()]);
    }

    #[tokio::test]
    async fn test_clear_writes_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        store.save(&[item()]).await.unwrap();
        store.clear().await.unwrap();

        // Cleared, not missing.
        assert_eq!(store.load().await.unwrap(), Some(vec![]));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        fs::write(store.path(), b"not json").unwrap();

        assert!(matches!(store.load().await, Err(StoreError::Serde(_))));
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        store.save(&[item()]).await.unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![CART_FILE]);
    }
}
