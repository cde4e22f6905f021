use crate::domain::CatalogEntry;

/// Read-only access to the product catalog.
///
/// The catalog is loaded once and never mutated, so lookups are synchronous.
pub trait CatalogRepository: Send + Sync {
    /// All entries in catalog order.
    fn entries(&self) -> &[CatalogEntry];

    fn find(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries().iter().find(|entry| entry.id() == id)
    }

    /// Distinct categories in the order they first appear.
    fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for entry in self.entries() {
            if !categories.iter().any(|c| c == entry.category()) {
                categories.push(entry.category().to_string());
            }
        }
        categories
    }

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
