//! Application-level catalog service.
//!
//! `CatalogService` is the composition root the presentation layer talks to. It owns
//! the live [`Inventory`] and a [`CatalogStore`], and exposes the full catalog API:
//!
//! ```text
//! add / remove / sell / restock            -> DomainResult (live inventory)
//! search_by_name / search_by_type / list   -> read-only views
//! total_value / sweep_expired              -> aggregates and bulk removal
//! save / load / save_to / load_from        -> persistence (StoreError)
//! ```
//!
//! Loads are all-or-nothing: the store (or codec) builds a complete new inventory
//! first, and the live one is swapped only after that succeeds.

use std::path::{Path, PathBuf};

use stockroom_core::DomainResult;
use stockroom_inventory::Inventory;
use stockroom_products::{Product, ProductType};

use crate::store::{self, CatalogStore, StoreError};

pub struct CatalogService<S> {
    inventory: Inventory,
    store: S,
}

impl<S> CatalogService<S>
where
    S: CatalogStore,
{
    /// Start with an empty inventory.
    pub fn new(store: S) -> Self {
        Self::with_inventory(Inventory::new(), store)
    }

    pub fn with_inventory(inventory: Inventory, store: S) -> Self {
        Self { inventory, store }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (Inventory, S) {
        (self.inventory, self.store)
    }

    pub fn add(&mut self, product: Product) -> DomainResult<()> {
        self.inventory.add(product)
    }

    pub fn remove(&mut self, product_id: &str) -> DomainResult<Product> {
        self.inventory.remove(product_id)
    }

    pub fn sell(&mut self, product_id: &str, quantity: i64) -> DomainResult<()> {
        self.inventory.sell(product_id, quantity)
    }

    pub fn restock(&mut self, product_id: &str, amount: i64) -> DomainResult<()> {
        self.inventory.restock(product_id, amount)
    }

    pub fn search_by_name(&self, needle: &str) -> Vec<&Product> {
        self.inventory.search_by_name(needle)
    }

    pub fn search_by_type(&self, product_type: ProductType) -> Vec<&Product> {
        self.inventory.search_by_type(product_type)
    }

    pub fn list_all(&self) -> Vec<&Product> {
        self.inventory.list_all()
    }

    pub fn total_value(&self) -> f64 {
        self.inventory.total_value()
    }

    pub fn sweep_expired(&mut self) -> usize {
        let removed = self.inventory.sweep_expired();
        tracing::debug!(removed, "expired groceries swept");
        removed
    }

    /// Persist the live inventory through the configured store.
    pub fn save(&self) -> Result<(), StoreError> {
        self.store.save(&self.inventory)
    }

    /// Replace the live inventory with the store's contents.
    ///
    /// On error the live inventory is left exactly as it was. Returns the number
    /// of products now held.
    pub fn load(&mut self) -> Result<usize, StoreError> {
        let loaded = self.store.load()?;
        Ok(self.commit(loaded))
    }

    /// Save to an ad-hoc file instead of the configured store.
    pub fn save_to(&self, path: impl AsRef<Path>, pretty: bool) -> Result<PathBuf, StoreError> {
        store::save_to_path(&self.inventory, path, pretty)
    }

    /// Load from an ad-hoc file instead of the configured store. Same
    /// all-or-nothing guarantee as [`CatalogService::load`].
    pub fn load_from(&mut self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let loaded = store::load_from_path(path)?;
        Ok(self.commit(loaded))
    }

    fn commit(&mut self, loaded: Inventory) -> usize {
        let count = loaded.len();
        let previous = self.inventory.replace_with(loaded);
        tracing::debug!(previous = previous.len(), current = count, "inventory replaced");
        count
    }
}
