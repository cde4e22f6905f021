use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::application::CatalogRepository;
use crate::domain::{CatalogEntry, CatalogError};

const BUNDLED_CATALOG: &str = include_str!("../../../data/catalog.json");

/// Catalog held entirely in memory, validated once at construction.
pub struct InMemoryCatalog {
    entries: Vec<CatalogEntry>,
}

impl InMemoryCatalog {
    /// Rejects empty or duplicate IDs and negative or non-finite prices.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();

        for entry in &entries {
            if entry.id().trim().is_empty() {
                return Err(CatalogError::invalid_entry(entry.name(), "empty id"));
            }
            if !entry.price().is_finite() || entry.price() < 0.0 {
                return Err(CatalogError::invalid_entry(
                    entry.id(),
                    format!("price must be a non-negative number, got {}", entry.price()),
                ));
            }
            if !seen.insert(entry.id()) {
                return Err(CatalogError::DuplicateId(entry.id().to_string()));
            }
        }

        Ok(Self { entries })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        debug!(
            "Loaded {} catalog entries from {}",
            catalog.entries.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_str(BUNDLED_CATALOG)
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}
