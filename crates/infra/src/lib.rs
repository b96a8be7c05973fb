//! Infrastructure layer: catalog persistence, configuration, and the
//! application-facing service that ties the inventory to a store.

pub mod codec;
pub mod config;
pub mod service;
pub mod store;

pub use config::StoreConfig;
pub use service::CatalogService;
pub use store::{CatalogStore, InMemoryCatalogStore, JsonFileStore, StoreError};
