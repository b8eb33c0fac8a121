//! In-memory catalog store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::catalog::item::CatalogItem;
use crate::catalog::store::CatalogStore;
use crate::error::{GameRankError, Result};
use crate::filter::{self, SearchFilters};

/// A [`CatalogStore`] holding every item in memory, keyed by id.
///
/// Suitable for the bounded catalogs this engine targets and for tests.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: RwLock<BTreeMap<u64, CatalogItem>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from a collection of items. Later duplicates win.
    pub fn from_items<I: IntoIterator<Item = CatalogItem>>(items: I) -> Self {
        let items = items.into_iter().map(|item| (item.id, item)).collect();
        Self {
            items: RwLock::new(items),
        }
    }

    /// Insert or replace an item, returning the previous version.
    pub fn insert(&self, item: CatalogItem) -> Option<CatalogItem> {
        self.items.write().insert(item.id, item)
    }

    /// Remove an item, returning it if it existed.
    pub fn remove(&self, id: u64) -> Option<CatalogItem> {
        self.items.write().remove(&id)
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn fetch_by_id(&self, id: u64) -> Result<Option<CatalogItem>> {
        Ok(self.items.read().get(&id).cloned())
    }

    async fn fetch_batch(&self, ids: &[u64]) -> Result<Vec<CatalogItem>> {
        let items = self.items.read();
        Ok(ids.iter().filter_map(|id| items.get(id).cloned()).collect())
    }

    async fn fetch_all(&self) -> Result<Vec<CatalogItem>> {
        Ok(self.items.read().values().cloned().collect())
    }

    async fn fetch_candidates(&self, filters: &SearchFilters) -> Result<Vec<CatalogItem>> {
        Ok(self
            .items
            .read()
            .values()
            .filter(|item| filter::apply(item, filters))
            .cloned()
            .collect())
    }

    async fn update_embedding(&self, id: u64, embedding: Vec<f32>) -> Result<()> {
        let mut items = self.items.write();
        let item = items
            .get_mut(&id)
            .ok_or_else(|| GameRankError::catalog(format!("Unknown item id: {id}")))?;
        item.embedding = Some(embedding);
        Ok(())
    }
}
