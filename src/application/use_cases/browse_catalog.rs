use std::sync::Arc;

use crate::application::CatalogRepository;
use crate::domain::CatalogEntry;

/// Curated selection shown before any search, in display order.
pub const DEFAULT_FEATURED_IDS: &[&str] = &["1", "5", "11", "16", "9", "14"];

pub struct BrowseCatalogUseCase {
    catalog: Arc<dyn CatalogRepository>,
    featured_ids: Vec<String>,
}

impl BrowseCatalogUseCase {
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self {
            catalog,
            featured_ids: DEFAULT_FEATURED_IDS.iter().map(|id| id.to_string()).collect(),
        }
    }

    pub fn with_featured_ids(mut self, ids: Vec<String>) -> Self {
        self.featured_ids = ids;
        self
    }

    /// Featured entries in curated order. IDs missing from the catalog are skipped.
    pub fn featured(&self) -> Vec<CatalogEntry> {
        self.featured_ids
            .iter()
            .filter_map(|id| self.catalog.find(id))
            .cloned()
            .collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<CatalogEntry> {
        self.catalog
            .entries()
            .iter()
            .filter(|entry| entry.in_category(category))
            .cloned()
            .collect()
    }

    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }

    /// Canonical spelling of `category` as it appears in the catalog.
    pub fn resolve_category(&self, category: &str) -> Option<String> {
        let wanted = category.trim();
        self.catalog
            .categories()
            .into_iter()
            .find(|c| c.eq_ignore_ascii_case(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::InMemoryCatalog;

    fn use_case() -> BrowseCatalogUseCase {
        let catalog = InMemoryCatalog::new(vec![
            CatalogEntry::new("1", "iPhone 15", 799.0, "Smartphones", ""),
            CatalogEntry::new("5", "MacBook Air M3", 1099.0, "Laptops", ""),
            CatalogEntry::new("6", "Dell XPS 13", 999.0, "Laptops", ""),
            CatalogEntry::new("16", "Switch OLED", 349.0, "Gaming", ""),
        ])
        .unwrap();
        BrowseCatalogUseCase::new(Arc::new(catalog))
    }

    #[test]
    fn featured_follows_curated_order_and_skips_missing() {
        let featured = use_case().featured();
        let ids: Vec<&str> = featured.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["1", "5", "16"]);
    }

    #[test]
    fn featured_ids_can_be_overridden() {
        let featured = use_case()
            .with_featured_ids(vec!["6".to_string(), "1".to_string()])
            .featured();
        let ids: Vec<&str> = featured.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["6", "1"]);
    }

    #[test]
    fn category_filter_is_case_insensitive() {
        let laptops = use_case().by_category("laptops");
        assert_eq!(laptops.len(), 2);
        assert!(use_case().by_category("Tablets").is_empty());
    }

    #[test]
    fn categories_in_first_seen_order() {
        assert_eq!(
            use_case().categories(),
            vec!["Smartphones", "Laptops", "Gaming"]
        );
        assert_eq!(use_case().resolve_category("GAMING"), Some("Gaming".to_string()));
        assert_eq!(use_case().resolve_category("Toys"), None);
    }
}
