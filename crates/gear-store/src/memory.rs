//! In-memory cart store.
//!
//! Backs session tests that need to observe writes or inject failures
//! without touching disk or network.

use crate::{CartStore, StoreError};
use async_trait::async_trait;
use gear_commerce::cart::LineItem;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

/// Process-local [`CartStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<Option<Vec<LineItem>>>,
    save_count: AtomicU64,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the persisted items.
    pub fn items(&self) -> Option<Vec<LineItem>> {
        self.items.lock().expect("memory store poisoned").clone()
    }

    /// How many saves (including clears) have landed.
    pub fn save_count(&self) -> u64 {
        self.save_count.load(Ordering::Relaxed)
    }

    /// Make subsequent writes fail, for error-path tests.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    fn write(&self, items: Vec<LineItem>) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Api("injected write failure".to_string()));
        }
        *self.items.lock().expect("memory store poisoned") = Some(items);
        self.save_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn load(&self) -> Result<Option<Vec<LineItem>>, StoreError> {
        Ok(self.items())
    }

    async fn save(&self, items: &[LineItem]) -> Result<(), StoreError> {
        self.write(items.to_vec())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.write(Vec::new())
    }
}
