//! In-memory backend holding the encoded catalog text.

use std::sync::{PoisonError, RwLock};

use stockroom_inventory::Inventory;

use super::r#trait::{CatalogStore, StoreError};
use crate::codec;

/// In-memory catalog store.
///
/// Keeps the encoded JSON text rather than a cloned inventory, so loads go through
/// the same decode path as the file store. Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    text: RwLock<Option<String>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw catalog text (possibly invalid).
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: RwLock::new(Some(text.into())),
        }
    }

    /// Current stored text, if anything has been saved.
    pub fn text(&self) -> Option<String> {
        self.text
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn save(&self, inventory: &Inventory) -> Result<(), StoreError> {
        let encoded = codec::encode(inventory, false)?;
        *self.text.write().unwrap_or_else(PoisonError::into_inner) = Some(encoded);
        Ok(())
    }

    /// An empty store loads as an empty inventory.
    fn load(&self) -> Result<Inventory, StoreError> {
        let guard = self.text.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_deref() {
            Some(text) => codec::decode(text),
            None => Ok(Inventory::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_products::Product;

    #[test]
    fn empty_store_loads_empty_inventory() {
        let store = InMemoryCatalogStore::new();
        assert!(store.load().unwrap().is_empty());
        assert!(store.text().is_none());
    }

    #[test]
    fn save_then_load_returns_equal_inventory() {
        let store = InMemoryCatalogStore::new();
        let inventory = Inventory::from_products([
            Product::electronics("E1", "Phone", 499.99, 10, 2, "Acme").unwrap(),
            Product::clothing("C1", "Shirt", 15.0, 5, "M", "Cotton").unwrap(),
        ])
        .unwrap();

        store.save(&inventory).unwrap();
        assert_eq!(store.load().unwrap(), inventory);
    }

    #[test]
    fn seeded_garbage_fails_to_load() {
        let store = InMemoryCatalogStore::with_text("{{");
        assert!(matches!(store.load(), Err(StoreError::Format(_))));
    }
}
