//! Products domain module.
//!
//! This crate contains the product hierarchy of the catalog: the shared fields
//! every sellable item carries, the closed set of category variants, and the
//! tagged record shape products are persisted as. Pure domain logic (no IO).

pub mod price;
pub mod product;
pub mod record;

pub use price::Price;
pub use product::{Clothing, Electronics, Grocery, Product, ProductDetails, ProductType};
pub use record::{BaseRecord, ClothingRecord, ElectronicsRecord, GroceryRecord, ProductRecord};
