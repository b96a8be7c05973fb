//! JSON file backend: path normalization plus whole-catalog save and load.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use stockroom_inventory::Inventory;

use super::r#trait::{CatalogStore, StoreError};
use crate::codec;
use crate::config::StoreConfig;

/// Validate a catalog path and give it a `.json` extension if it lacks one.
pub fn normalize_path(path: impl AsRef<Path>) -> Result<PathBuf, StoreError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(StoreError::InvalidPath("path cannot be empty".to_string()));
    }
    if path.extension().is_some_and(|ext| ext == "json") {
        return Ok(path.to_path_buf());
    }
    let mut with_ext = OsString::from(path.as_os_str());
    with_ext.push(".json");
    Ok(PathBuf::from(with_ext))
}

/// Write the whole inventory to `path` as a JSON array.
///
/// The file handle is opened, written and closed within this call.
pub fn save_to_path(
    inventory: &Inventory,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<PathBuf, StoreError> {
    let path = normalize_path(path)?;
    let text = codec::encode(inventory, pretty)?;
    fs::write(&path, text).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), products = inventory.len(), "catalog saved");
    Ok(path)
}

/// Read and decode a catalog file into a fresh inventory.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Inventory, StoreError> {
    let path = normalize_path(path)?;
    let text = fs::read_to_string(&path).map_err(|source| StoreError::Io {
        path: path.clone(),
        source,
    })?;
    match codec::decode(&text) {
        Ok(inventory) => {
            tracing::info!(path = %path.display(), products = inventory.len(), "catalog loaded");
            Ok(inventory)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "catalog rejected");
            Err(err)
        }
    }
}

/// Catalog store backed by one JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self {
            path: normalize_path(path)?,
            pretty: true,
        })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Ok(Self::new(&config.data_file)?.with_pretty(config.pretty))
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for JsonFileStore {
    fn save(&self, inventory: &Inventory) -> Result<(), StoreError> {
        save_to_path(inventory, &self.path, self.pretty).map(|_| ())
    }

    fn load(&self) -> Result<Inventory, StoreError> {
        load_from_path(&self.path)
    }
}
