//! Product hierarchy: shared fields, the closed set of categories and the
//! stock rules every product enforces.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId};

use crate::price::Price;
use crate::record::ProductRecord;

/// Calendar format expiry dates are parsed from and rendered as.
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date on the local calendar (the reference point for expiry).
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Category discriminator of a product.
///
/// The tag strings are part of the persisted format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductType {
    Electronics,
    Grocery,
    Clothing,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::Electronics,
        ProductType::Grocery,
        ProductType::Clothing,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ProductType::Electronics => "electronics",
            ProductType::Grocery => "grocery",
            ProductType::Clothing => "clothing",
        }
    }

    /// Look a tag up in the variant table. `None` for anything unknown.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

impl core::fmt::Display for ProductType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}

impl core::str::FromStr for ProductType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
            .ok_or_else(|| DomainError::validation(format!("unknown product type: {s}")))
    }
}

fn require_text(field: &str, value: String) -> DomainResult<String> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(value)
}

/// Electronics-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Electronics {
    warranty_years: u32,
    brand: String,
}

impl Electronics {
    pub fn new(warranty_years: u32, brand: impl Into<String>) -> DomainResult<Self> {
        Ok(Self {
            warranty_years,
            brand: require_text("brand", brand.into())?,
        })
    }

    pub fn warranty_years(&self) -> u32 {
        self.warranty_years
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }
}

/// Grocery-specific attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grocery {
    expiry_date: NaiveDate,
}

impl Grocery {
    pub fn new(expiry_date: NaiveDate) -> Self {
        Self { expiry_date }
    }

    /// Parse a `YYYY-MM-DD` expiry date.
    pub fn parse(expiry_date: &str) -> DomainResult<Self> {
        NaiveDate::parse_from_str(expiry_date, EXPIRY_DATE_FORMAT)
            .map(Self::new)
            .map_err(|e| {
                DomainError::validation(format!("invalid expiry_date {expiry_date:?}: {e}"))
            })
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Expired means the expiry date lies strictly before `today`.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_on(local_today())
    }
}

/// Clothing-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clothing {
    size: String,
    material: String,
}

impl Clothing {
    pub fn new(size: impl Into<String>, material: impl Into<String>) -> DomainResult<Self> {
        Ok(Self {
            size: require_text("size", size.into())?,
            material: require_text("material", material.into())?,
        })
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn material(&self) -> &str {
        &self.material
    }
}

/// Category-specific part of a product.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductDetails {
    Electronics(Electronics),
    Grocery(Grocery),
    Clothing(Clothing),
}

impl ProductDetails {
    pub fn product_type(&self) -> ProductType {
        match self {
            ProductDetails::Electronics(_) => ProductType::Electronics,
            ProductDetails::Grocery(_) => ProductType::Grocery,
            ProductDetails::Clothing(_) => ProductType::Clothing,
        }
    }
}

/// A sellable catalog item.
///
/// Shared fields live here; category fields live in [`ProductDetails`].
/// `name` is free text (it may be empty). Invariants held at all times:
/// - `price > 0` (see [`Price`])
/// - `quantity_in_stock >= 0`
/// - `product_id` never changes after construction
///
/// Serializes as a tagged [`ProductRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ProductRecord", try_from = "ProductRecord")]
pub struct Product {
    id: ProductId,
    name: String,
    price: Price,
    quantity_in_stock: i64,
    details: ProductDetails,
}

impl Product {
    pub fn new(
        product_id: impl AsRef<str>,
        name: impl Into<String>,
        price: f64,
        quantity_in_stock: i64,
        details: ProductDetails,
    ) -> DomainResult<Self> {
        let id = ProductId::new(product_id)?;
        let name = name.into();
        let price = Price::new(price)?;
        if quantity_in_stock < 0 {
            return Err(DomainError::validation(format!(
                "quantity_in_stock cannot be negative (got {quantity_in_stock})"
            )));
        }

        Ok(Self {
            id,
            name,
            price,
            quantity_in_stock,
            details,
        })
    }

    pub fn electronics(
        product_id: impl AsRef<str>,
        name: impl Into<String>,
        price: f64,
        quantity_in_stock: i64,
        warranty_years: u32,
        brand: impl Into<String>,
    ) -> DomainResult<Self> {
        let details = ProductDetails::Electronics(Electronics::new(warranty_years, brand)?);
        Self::new(product_id, name, price, quantity_in_stock, details)
    }

    pub fn grocery(
        product_id: impl AsRef<str>,
        name: impl Into<String>,
        price: f64,
        quantity_in_stock: i64,
        expiry_date: NaiveDate,
    ) -> DomainResult<Self> {
        let details = ProductDetails::Grocery(Grocery::new(expiry_date));
        Self::new(product_id, name, price, quantity_in_stock, details)
    }

    pub fn clothing(
        product_id: impl AsRef<str>,
        name: impl Into<String>,
        price: f64,
        quantity_in_stock: i64,
        size: impl Into<String>,
        material: impl Into<String>,
    ) -> DomainResult<Self> {
        let details = ProductDetails::Clothing(Clothing::new(size, material)?);
        Self::new(product_id, name, price, quantity_in_stock, details)
    }

    pub fn product_id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price.value()
    }

    /// Replace the unit price. A non-positive price is rejected and the old one kept.
    pub fn set_price(&mut self, price: f64) -> DomainResult<()> {
        self.price = Price::new(price)?;
        Ok(())
    }

    pub fn quantity_in_stock(&self) -> i64 {
        self.quantity_in_stock
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    pub fn product_type(&self) -> ProductType {
        self.details.product_type()
    }

    pub fn as_grocery(&self) -> Option<&Grocery> {
        match &self.details {
            ProductDetails::Grocery(g) => Some(g),
            _ => None,
        }
    }

    /// Only groceries expire; every other category reports `false`.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.as_grocery().is_some_and(|g| g.is_expired_on(today))
    }

    pub fn restock(&mut self, amount: i64) -> DomainResult<()> {
        if amount <= 0 {
            return Err(DomainError::validation(format!(
                "restock amount must be positive (got {amount})"
            )));
        }
        self.quantity_in_stock = self
            .quantity_in_stock
            .checked_add(amount)
            .ok_or_else(|| DomainError::validation("restock overflows the stock counter"))?;
        Ok(())
    }

    pub fn sell(&mut self, quantity: i64) -> DomainResult<()> {
        if quantity <= 0 {
            return Err(DomainError::validation(format!(
                "sale quantity must be positive (got {quantity})"
            )));
        }
        if quantity > self.quantity_in_stock {
            return Err(DomainError::insufficient_stock(
                self.id.clone(),
                self.quantity_in_stock,
                quantity,
            ));
        }
        self.quantity_in_stock -= quantity;
        Ok(())
    }

    /// `price * quantity_in_stock`.
    pub fn total_value(&self) -> f64 {
        self.price.value() * self.quantity_in_stock as f64
    }

    /// Human-readable one-line summary including the category fields.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.details {
            ProductDetails::Electronics(e) => write!(
                f,
                "Electronics - ID: {}, Name: {}, Brand: {}, Price: {}, Warranty: {} years, Stock: {}",
                self.id, self.name, e.brand, self.price, e.warranty_years, self.quantity_in_stock
            ),
            ProductDetails::Grocery(g) => {
                let expired = if g.is_expired() { " (EXPIRED)" } else { "" };
                write!(
                    f,
                    "Grocery - ID: {}, Name: {}, Price: {}, Expiry: {}{}, Stock: {}",
                    self.id,
                    self.name,
                    self.price,
                    g.expiry_date.format(EXPIRY_DATE_FORMAT),
                    expired,
                    self.quantity_in_stock
                )
            }
            ProductDetails::Clothing(c) => write!(
                f,
                "Clothing - ID: {}, Name: {}, Size: {}, Material: {}, Price: {}, Stock: {}",
                self.id, self.name, c.size, c.material, self.price, self.quantity_in_stock
            ),
        }
    }
}
