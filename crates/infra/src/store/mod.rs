//! Catalog persistence boundary.
//!
//! This module defines the whole-catalog store abstraction plus its two
//! implementations: a JSON file on disk and an in-memory buffer for tests/dev.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::{JsonFileStore, load_from_path, normalize_path, save_to_path};
pub use in_memory::InMemoryCatalogStore;
pub use r#trait::{CatalogStore, StoreError};
