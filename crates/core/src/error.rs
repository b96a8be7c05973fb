//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// stock invariants, key conflicts). Storage concerns belong in the infra layer.
///
/// Every variant carries enough structure for a caller to render a precise
/// message without re-deriving it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. non-positive price, empty required string).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A sale asked for more units than are in stock.
    #[error("insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// A product with the same id is already present.
    #[error("product {0} already exists")]
    DuplicateKey(ProductId),

    /// No product with the given id is present.
    ///
    /// Carries the id exactly as the caller supplied it, which may be blank.
    #[error("product {0:?} not found")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn insufficient_stock(product_id: ProductId, available: i64, requested: i64) -> Self {
        Self::InsufficientStock {
            product_id,
            available,
            requested,
        }
    }

    pub fn duplicate(product_id: ProductId) -> Self {
        Self::DuplicateKey(product_id)
    }

    pub fn not_found(product_id: impl Into<String>) -> Self {
        Self::NotFound(product_id.into())
    }
}
