//! In-memory item repository

use crate::{unix_now, StoreError};
use async_trait::async_trait;
use minidna_domain::traits::ItemRepository;
use minidna_domain::{IdentityKey, Item, ItemId, NewItem};
use std::sync::{Arc, Mutex, MutexGuard};

/// Process-local implementation of ItemRepository
///
/// Items live in a vector in insertion order. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<Vec<Item>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items
    pub fn item_count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Item>>, StoreError> {
        self.items
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }
}

#[async_trait]
impl ItemRepository for MemoryStore {
    type Error = StoreError;

    async fn find_first_by_fingerprint(
        &self,
        key: &IdentityKey,
    ) -> Result<Option<Item>, Self::Error> {
        let items = self.lock()?;
        Ok(items.iter().find(|item| &item.fingerprint == key).cloned())
    }

    async fn create_item(&self, item: NewItem) -> Result<Item, Self::Error> {
        let mut items = self.lock()?;
        let stored = item.into_item(ItemId::new(), unix_now());
        items.push(stored.clone());
        Ok(stored)
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<Item>, Self::Error> {
        let items = self.lock()?;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }
}
