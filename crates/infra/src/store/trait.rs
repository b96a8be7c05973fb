//! Store contract and its error type.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use stockroom_core::DomainError;
use stockroom_inventory::Inventory;

/// Catalog persistence error.
///
/// These are **infrastructure errors** (storage medium, file format) as opposed to
/// the domain errors raised by live inventory operations. Record-level failures wrap
/// the domain error that rejected the record, so callers can still match on
/// `DomainError::DuplicateKey` or `DomainError::Validation`.
///
/// ## Error Categories
///
/// - **InvalidPath**: The destination/source path was empty
/// - **Io**: The file could not be read or written
/// - **Format**: The text is not a JSON array of objects
/// - **UnknownVariant**: A record's `type` tag is not a known product category
/// - **InvalidRecord**: A record is missing fields, fails validation, or repeats an id
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid catalog path: {0}")]
    InvalidPath(String),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog data: {0}")]
    Format(#[source] serde_json::Error),

    #[error("record {index}: unknown product type {tag:?}")]
    UnknownVariant { index: usize, tag: String },

    #[error("record {index}: {source}")]
    InvalidRecord {
        index: usize,
        /// Id of the offending record, when it carried a readable one.
        product_id: Option<String>,
        #[source]
        source: DomainError,
    },
}

impl StoreError {
    /// The domain error that rejected a record, if this is a record-level failure.
    pub fn domain_error(&self) -> Option<&DomainError> {
        match self {
            StoreError::InvalidRecord { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Whole-catalog persistence boundary.
///
/// A store writes the complete product set and reads it back; there is no partial
/// or streaming access.
///
/// ## Load Semantics
///
/// `load()` is all-or-nothing: it either returns a fully built [`Inventory`]
/// holding every persisted record, or an error. Callers replace their live
/// inventory only on success, so a failed load never disturbs existing state.
pub trait CatalogStore {
    /// Persist every product of `inventory`, replacing previous contents.
    fn save(&self, inventory: &Inventory) -> Result<(), StoreError>;

    /// Read back a complete inventory.
    fn load(&self) -> Result<Inventory, StoreError>;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn save(&self, inventory: &Inventory) -> Result<(), StoreError> {
        (**self).save(inventory)
    }

    fn load(&self) -> Result<Inventory, StoreError> {
        (**self).load()
    }
}
