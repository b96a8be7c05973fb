//! In-memory catalog container.

use chrono::NaiveDate;
use indexmap::IndexMap;

use stockroom_core::{DomainError, DomainResult, Entity, ProductId};
use stockroom_products::product::local_today;
use stockroom_products::{Product, ProductType};

/// Keyed collection of catalog products.
///
/// Owns every product it holds; callers get shared references out and mutate
/// only through the operations below. Each product id appears at most once.
///
/// Iteration follows insertion order. Lookups are O(1); `remove` shifts the
/// entries after the removed one to keep that order, so it is O(n) in the
/// worst case. Display order matters more here than removal cost.
///
/// Not synchronized: an embedding application that shares one inventory
/// across threads must serialize access itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    products: IndexMap<ProductId, Product>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory by adding products one at a time, in order.
    ///
    /// Fails on the first duplicate id; nothing is returned in that case.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> DomainResult<Self> {
        let mut inventory = Self::new();
        for product in products {
            inventory.add(product)?;
        }
        Ok(inventory)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn add(&mut self, product: Product) -> DomainResult<()> {
        if self.products.contains_key(product.id()) {
            return Err(DomainError::duplicate(product.id().clone()));
        }
        self.products.insert(product.id().clone(), product);
        Ok(())
    }

    /// Remove a product and hand it back to the caller.
    ///
    /// Any id that is not present, including a blank one, is `NotFound`.
    pub fn remove(&mut self, product_id: &str) -> DomainResult<Product> {
        self.products
            .shift_remove(product_id)
            .ok_or_else(|| DomainError::not_found(product_id))
    }

    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.get(product_id)
    }

    fn get_mut(&mut self, product_id: &str) -> DomainResult<&mut Product> {
        self.products
            .get_mut(product_id)
            .ok_or_else(|| DomainError::not_found(product_id))
    }

    pub fn sell(&mut self, product_id: &str, quantity: i64) -> DomainResult<()> {
        self.get_mut(product_id)?.sell(quantity)
    }

    pub fn restock(&mut self, product_id: &str, amount: i64) -> DomainResult<()> {
        self.get_mut(product_id)?.restock(amount)
    }

    /// All products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> + '_ {
        self.products.values()
    }

    pub fn list_all(&self) -> Vec<&Product> {
        self.iter().collect()
    }

    /// Case-insensitive substring match on the product name.
    ///
    /// An empty needle matches every product.
    pub fn search_by_name(&self, needle: &str) -> Vec<&Product> {
        let needle = needle.to_lowercase();
        self.iter()
            .filter(|p| p.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// Linear filter on the category tag; catalogs are small enough that a
    /// per-type index has not been worth maintaining.
    pub fn search_by_type(&self, product_type: ProductType) -> Vec<&Product> {
        self.iter()
            .filter(|p| p.product_type() == product_type)
            .collect()
    }

    /// Sum of `price * quantity_in_stock` over every product (0 when empty).
    pub fn total_value(&self) -> f64 {
        self.iter().map(Product::total_value).sum()
    }

    /// Remove every grocery that expired before today's local date.
    pub fn sweep_expired(&mut self) -> usize {
        self.sweep_expired_as_of(local_today())
    }

    /// Remove every grocery whose expiry date lies before `today`.
    ///
    /// Returns how many products were removed. Other categories are untouched
    /// and the survivors keep their relative order.
    pub fn sweep_expired_as_of(&mut self, today: NaiveDate) -> usize {
        let before = self.products.len();
        self.products.retain(|id, product| {
            let expired = product.is_expired_on(today);
            if expired {
                tracing::debug!(product_id = %id, "removing expired product");
            }
            !expired
        });
        before - self.products.len()
    }

    /// Swap in a fully built inventory, returning the previous contents.
    pub fn replace_with(&mut self, other: Inventory) -> Inventory {
        std::mem::replace(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_products::product::EXPIRY_DATE_FORMAT;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, EXPIRY_DATE_FORMAT).unwrap()
    }

    fn phone() -> Product {
        Product::electronics("E1", "Phone", 499.99, 10, 2, "Acme").unwrap()
    }

    fn milk(expiry: &str) -> Product {
        Product::grocery("G1", "Milk", 2.5, 20, date(expiry)).unwrap()
    }

    fn shirt() -> Product {
        Product::clothing("C1", "Shirt", 15.0, 5, "M", "Cotton").unwrap()
    }

    fn sample() -> Inventory {
        Inventory::from_products([phone(), milk("2025-01-01"), shirt()]).unwrap()
    }

    #[test]
    fn add_rejects_duplicate_ids_without_mutation() {
        let mut inventory = sample();
        let before = inventory.clone();

        let other = Product::electronics("E1", "Tablet", 199.0, 1, 1, "Other").unwrap();
        let err = inventory.add(other).unwrap_err();

        assert_eq!(err, DomainError::DuplicateKey("E1".parse().unwrap()));
        assert_eq!(inventory, before);
        assert_eq!(inventory.get("E1").unwrap().name(), "Phone");
    }

    #[test]
    fn remove_returns_product_and_forgets_it() {
        let mut inventory = sample();
        let removed = inventory.remove("G1").unwrap();
        assert_eq!(removed.name(), "Milk");
        assert_eq!(inventory.len(), 2);
        assert!(inventory.get("G1").is_none());

        match inventory.remove("G1") {
            Err(DomainError::NotFound(id)) => assert_eq!(id.as_str(), "G1"),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn sell_scenario_keeps_stock_on_shortfall() {
        let mut inventory = sample();
        inventory.sell("E1", 3).unwrap();
        assert_eq!(inventory.get("E1").unwrap().quantity_in_stock(), 7);

        let err = inventory.sell("E1", 100).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                product_id: "E1".parse().unwrap(),
                available: 7,
                requested: 100,
            }
        );
        assert_eq!(inventory.get("E1").unwrap().quantity_in_stock(), 7);
    }

    #[test]
    fn blank_ids_are_not_found() {
        let mut inventory = sample();
        let before = inventory.clone();

        assert_eq!(inventory.remove(""), Err(DomainError::NotFound(String::new())));
        assert_eq!(inventory.sell("", 1), Err(DomainError::NotFound(String::new())));
        assert_eq!(
            inventory.restock("   ", 1),
            Err(DomainError::NotFound("   ".to_string()))
        );
        assert!(inventory.get("").is_none());
        assert_eq!(inventory, before);
    }

    #[test]
    fn ids_are_matched_verbatim() {
        let mut inventory = sample();
        inventory
            .add(Product::clothing(" C1 ", "Padded Shirt", 20.0, 1, "L", "Wool").unwrap())
            .unwrap();

        assert_eq!(inventory.get(" C1 ").unwrap().name(), "Padded Shirt");
        assert_eq!(inventory.get("C1").unwrap().name(), "Shirt");
        assert!(matches!(inventory.sell("C1 ", 1), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn sell_and_restock_require_known_ids() {
        let mut inventory = sample();
        assert!(matches!(inventory.sell("X9", 1), Err(DomainError::NotFound(_))));
        assert!(matches!(inventory.restock("X9", 1), Err(DomainError::NotFound(_))));
        assert!(matches!(inventory.restock("C1", 0), Err(DomainError::Validation(_))));

        inventory.restock("C1", 5).unwrap();
        assert_eq!(inventory.get("C1").unwrap().quantity_in_stock(), 10);
    }

    #[test]
    fn total_value_scenario() {
        let mut inventory = Inventory::new();
        assert_eq!(inventory.total_value(), 0.0);
        inventory.add(milk("2025-01-01")).unwrap();
        assert_eq!(inventory.total_value(), 50.0);
    }

    #[test]
    fn search_by_name_is_case_insensitive_and_ordered() {
        let mut inventory = sample();
        inventory
            .add(Product::electronics("E2", "Smartphone Case", 9.0, 3, 0, "Acme").unwrap())
            .unwrap();

        let ids: Vec<&str> = inventory
            .search_by_name("PHONE")
            .into_iter()
            .map(|p| p.product_id().as_str())
            .collect();
        assert_eq!(ids, ["E1", "E2"]);

        assert_eq!(inventory.search_by_name("").len(), 4);
        assert!(inventory.search_by_name("sofa").is_empty());
    }

    #[test]
    fn search_by_type_filters_on_category() {
        let inventory = sample();
        for t in ProductType::ALL {
            let hits = inventory.search_by_type(t);
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].product_type(), t);
        }
    }

    #[test]
    fn list_all_preserves_insertion_order() {
        let mut inventory = sample();
        inventory.remove("E1").unwrap();
        inventory.add(phone()).unwrap();
        let ids: Vec<&str> = inventory
            .list_all()
            .into_iter()
            .map(|p| p.product_id().as_str())
            .collect();
        assert_eq!(ids, ["G1", "C1", "E1"]);
    }

    #[test]
    fn sweep_removes_only_expired_groceries() {
        let mut inventory = sample();
        inventory
            .add(Product::grocery("G2", "Rice", 3.0, 4, date("2025-06-01")).unwrap())
            .unwrap();
        inventory
            .add(Product::grocery("G3", "Bread", 1.0, 2, date("2025-03-01")).unwrap())
            .unwrap();

        let removed = inventory.sweep_expired_as_of(date("2025-03-01"));
        assert_eq!(removed, 1);

        let ids: Vec<&str> = inventory
            .list_all()
            .into_iter()
            .map(|p| p.product_id().as_str())
            .collect();
        assert_eq!(ids, ["E1", "C1", "G2", "G3"]);
    }

    #[test]
    fn sweep_with_nothing_expired_is_a_no_op() {
        let mut inventory = sample();
        let before = inventory.clone();
        assert_eq!(inventory.sweep_expired_as_of(date("2024-01-01")), 0);
        assert_eq!(inventory, before);

        let mut empty = Inventory::new();
        assert_eq!(empty.sweep_expired(), 0);
    }

    #[test]
    fn replace_with_swaps_contents() {
        let mut inventory = sample();
        let fresh = Inventory::from_products([shirt()]).unwrap();
        let old = inventory.replace_with(fresh);
        assert_eq!(old.len(), 3);
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn from_products_fails_on_duplicate() {
        let err = Inventory::from_products([phone(), shirt(), phone()]).unwrap_err();
        assert_eq!(err, DomainError::DuplicateKey("E1".parse().unwrap()));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: adding an existing id never mutates the inventory.
            #[test]
            fn duplicate_add_is_a_no_op(
                name in "[A-Za-z][A-Za-z ]{0,20}",
                price in 0.01f64..10_000.0,
                stock in 0i64..10_000
            ) {
                let mut inventory = sample();
                let before = inventory.clone();
                let dup = Product::clothing("C1", name, price, stock, "L", "Wool").unwrap();
                prop_assert!(inventory.add(dup).is_err());
                prop_assert_eq!(inventory, before);
            }

            /// Property: the sweep removes exactly the groceries expiring before `today`.
            #[test]
            fn sweep_removes_exactly_expired(
                offsets in prop::collection::vec(-30i64..30, 0..12)
            ) {
                let today = date("2025-06-15");
                let mut inventory = Inventory::from_products([phone(), shirt()]).unwrap();
                for (i, offset) in offsets.iter().enumerate() {
                    let expiry = today + chrono::Duration::days(*offset);
                    inventory
                        .add(Product::grocery(format!("G{i}"), "Item", 1.0, 1, expiry).unwrap())
                        .unwrap();
                }

                let expected = offsets.iter().filter(|o| **o < 0).count();
                prop_assert_eq!(inventory.sweep_expired_as_of(today), expected);
                prop_assert_eq!(inventory.len(), 2 + offsets.len() - expected);
                prop_assert!(inventory.iter().all(|p| !p.is_expired_on(today)));
                prop_assert!(inventory.get("E1").is_some());
                prop_assert!(inventory.get("C1").is_some());
            }
        }
    }
}
