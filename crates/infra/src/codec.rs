//! JSON codec for the persisted catalog.
//!
//! The catalog is a single JSON array of tagged product records (see
//! `stockroom_products::record`). This module is pure: it converts between an
//! [`Inventory`] and text, and leaves IO to the stores.
//!
//! Decoding classifies each failure:
//!
//! ```text
//! not JSON / not an array        -> StoreError::Format
//! unknown or missing `type` tag  -> StoreError::UnknownVariant
//! missing field / bad value      -> StoreError::InvalidRecord (DomainError::Validation)
//! repeated product_id            -> StoreError::InvalidRecord (DomainError::DuplicateKey)
//! ```
//!
//! The first failing record aborts the decode; no partially built inventory escapes.

use serde_json::Value as JsonValue;

use stockroom_core::DomainError;
use stockroom_inventory::Inventory;
use stockroom_products::{Product, ProductRecord, ProductType};

use crate::store::StoreError;

/// Render every product, in inventory order, as a JSON array.
pub fn encode(inventory: &Inventory, pretty: bool) -> Result<String, StoreError> {
    let records: Vec<ProductRecord> = inventory.iter().map(ProductRecord::from).collect();
    let text = if pretty {
        serde_json::to_string_pretty(&records)
    } else {
        serde_json::to_string(&records)
    };
    text.map_err(StoreError::Format)
}

/// Parse a JSON array of records into a fresh inventory.
pub fn decode(text: &str) -> Result<Inventory, StoreError> {
    let values: Vec<JsonValue> = serde_json::from_str(text).map_err(StoreError::Format)?;

    let mut inventory = Inventory::new();
    for (index, value) in values.into_iter().enumerate() {
        let product = decode_record(index, value)?;
        let product_id = product.product_id().to_string();
        inventory
            .add(product)
            .map_err(|source| StoreError::InvalidRecord {
                index,
                product_id: Some(product_id),
                source,
            })?;
    }
    Ok(inventory)
}

fn decode_record(index: usize, value: JsonValue) -> Result<Product, StoreError> {
    if !value.is_object() {
        return Err(StoreError::InvalidRecord {
            index,
            product_id: None,
            source: DomainError::validation(format!("record must be an object, found {value}")),
        });
    }

    let product_id = value
        .get("product_id")
        .and_then(JsonValue::as_str)
        .map(str::to_string);

    match value.get("type") {
        Some(JsonValue::String(tag)) if ProductType::from_tag(tag).is_some() => {}
        Some(JsonValue::String(tag)) => {
            return Err(StoreError::UnknownVariant {
                index,
                tag: tag.clone(),
            });
        }
        Some(other) => {
            return Err(StoreError::UnknownVariant {
                index,
                tag: other.to_string(),
            });
        }
        None => {
            return Err(StoreError::UnknownVariant {
                index,
                tag: JsonValue::Null.to_string(),
            });
        }
    }

    let record: ProductRecord =
        serde_json::from_value(value).map_err(|e| StoreError::InvalidRecord {
            index,
            product_id: product_id.clone(),
            source: DomainError::validation(e.to_string()),
        })?;

    Product::try_from(record).map_err(|source| StoreError::InvalidRecord {
        index,
        product_id,
        source,
    })
}
