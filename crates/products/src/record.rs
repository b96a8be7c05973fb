//! Persisted record shape of a product.
//!
//! A record is one entry of the catalog file: a `type` discriminator plus the
//! shared fields plus the variant's own fields, e.g.
//!
//! ```text
//! {"type":"grocery","product_id":"G1","name":"Milk","price":2.5,
//!  "quantity_in_stock":20,"expiry_date":"2025-01-01"}
//! ```
//!
//! Field names and tag values are a compatibility contract. Records hold plain
//! strings and signed integers; range and format checks happen on conversion
//! into a [`Product`] and fail with `DomainError::Validation`.

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult};

use crate::product::{
    Clothing, Electronics, Grocery, Product, ProductDetails, ProductType, EXPIRY_DATE_FORMAT,
};

/// Fields every record carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRecord {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity_in_stock: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectronicsRecord {
    #[serde(flatten)]
    pub base: BaseRecord,
    pub warranty_years: i64,
    pub brand: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryRecord {
    #[serde(flatten)]
    pub base: BaseRecord,
    pub expiry_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingRecord {
    #[serde(flatten)]
    pub base: BaseRecord,
    pub size: String,
    pub material: String,
}

/// One tagged entry of the persisted catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProductRecord {
    Electronics(ElectronicsRecord),
    Grocery(GroceryRecord),
    Clothing(ClothingRecord),
}

impl ProductRecord {
    pub fn product_type(&self) -> ProductType {
        match self {
            ProductRecord::Electronics(_) => ProductType::Electronics,
            ProductRecord::Grocery(_) => ProductType::Grocery,
            ProductRecord::Clothing(_) => ProductType::Clothing,
        }
    }

    pub fn base(&self) -> &BaseRecord {
        match self {
            ProductRecord::Electronics(r) => &r.base,
            ProductRecord::Grocery(r) => &r.base,
            ProductRecord::Clothing(r) => &r.base,
        }
    }
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        let base = BaseRecord {
            product_id: product.product_id().to_string(),
            name: product.name().to_string(),
            price: product.price(),
            quantity_in_stock: product.quantity_in_stock(),
        };

        match product.details() {
            ProductDetails::Electronics(e) => ProductRecord::Electronics(ElectronicsRecord {
                base,
                warranty_years: i64::from(e.warranty_years()),
                brand: e.brand().to_string(),
            }),
            ProductDetails::Grocery(g) => ProductRecord::Grocery(GroceryRecord {
                base,
                expiry_date: g.expiry_date().format(EXPIRY_DATE_FORMAT).to_string(),
            }),
            ProductDetails::Clothing(c) => ProductRecord::Clothing(ClothingRecord {
                base,
                size: c.size().to_string(),
                material: c.material().to_string(),
            }),
        }
    }
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        Self::from(&product)
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(record: ProductRecord) -> DomainResult<Self> {
        let (base, details) = match record {
            ProductRecord::Electronics(r) => {
                let warranty_years = u32::try_from(r.warranty_years).map_err(|_| {
                    DomainError::validation(format!(
                        "warranty_years must be a non-negative integer (got {})",
                        r.warranty_years
                    ))
                })?;
                let details = ProductDetails::Electronics(Electronics::new(warranty_years, r.brand)?);
                (r.base, details)
            }
            ProductRecord::Grocery(r) => {
                let details = ProductDetails::Grocery(Grocery::parse(&r.expiry_date)?);
                (r.base, details)
            }
            ProductRecord::Clothing(r) => {
                let details = ProductDetails::Clothing(Clothing::new(r.size, r.material)?);
                (r.base, details)
            }
        };

        Product::new(
            base.product_id,
            base.name,
            base.price,
            base.quantity_in_stock,
            details,
        )
    }
}
