//! Catalog read interface and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use common::ItemId;
use domain::Item;
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};

/// Read-only access to the item catalog.
///
/// The catalog is owned by an external collaborator; the storefront only
/// ever reads from it.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetches the full catalog.
    async fn fetch_all(&self) -> Result<Vec<Item>>;

    /// Fetches a single item by id. Returns None when the id is unknown.
    async fn fetch_by_id(&self, id: ItemId) -> Result<Option<Item>>;
}

#[derive(Debug, Default)]
struct CatalogState {
    items: Vec<Item>,
    unavailable: bool,
}

/// In-memory catalog for tests and the demo server.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalogStore {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-populated with the given items.
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            state: Arc::new(RwLock::new(CatalogState {
                items,
                unavailable: false,
            })),
        }
    }

    /// Adds an item to the catalog.
    pub async fn insert(&self, item: Item) {
        self.state.write().await.items.push(item);
    }

    /// Configures the store to fail every call, simulating an outage.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.write().await.unavailable = unavailable;
    }

    /// Returns the number of items in the catalog.
    pub async fn item_count(&self) -> usize {
        self.state.read().await.items.len()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn fetch_all(&self) -> Result<Vec<Item>> {
        let state = self.state.read().await;
        if state.unavailable {
            return Err(StoreError::Unavailable("catalog fetch failed".to_string()));
        }
        Ok(state.items.clone())
    }

    async fn fetch_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        let state = self.state.read().await;
        if state.unavailable {
            return Err(StoreError::Unavailable("catalog fetch failed".to_string()));
        }
        Ok(state.items.iter().find(|item| item.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Money;

    fn item(id: u32) -> Item {
        Item::new(id, format!("Game {id}"), Money::from_cents(999), "Indie", "PC", "")
    }

    #[tokio::test]
    async fn fetch_all_returns_seeded_items() {
        let store = InMemoryCatalogStore::with_items(vec![item(1), item(2)]);
        let items = store.fetch_all().await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn fetch_by_id_finds_item() {
        let store = InMemoryCatalogStore::with_items(vec![item(1), item(2)]);

        let found = store.fetch_by_id(2.into()).await.unwrap();
        assert_eq!(found.unwrap().id, ItemId::new(2));

        let missing = store.fetch_by_id(9.into()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn unavailable_store_fails_reads() {
        let store = InMemoryCatalogStore::with_items(vec![item(1)]);
        store.set_unavailable(true).await;

        assert!(matches!(
            store.fetch_all().await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.fetch_by_id(1.into()).await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
