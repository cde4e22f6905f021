use std::collections::{HashMap, HashSet};

use crate::domain::CatalogEntry;

use super::prompt_builder::MAX_RECOMMENDATIONS;

/// Map model-supplied IDs back to catalog entries.
///
/// Unknown IDs are dropped, repeats keep their first position, and the model's
/// ordering is preserved.
///
/// # Limit
///
/// The result is truncated to [`MAX_RECOMMENDATIONS`] entries, the upper bound
/// the prompt asks the model for. Valid IDs past that point are discarded even
/// when they resolve.
pub fn resolve_ids(ids: &[String], entries: &[CatalogEntry]) -> Vec<CatalogEntry> {
    let by_id: HashMap<&str, &CatalogEntry> = entries.iter().map(|e| (e.id(), e)).collect();
    let mut seen = HashSet::new();

    ids.iter()
        .filter_map(|id| by_id.get(id.as_str()).copied())
        .filter(|entry| seen.insert(entry.id()))
        .take(MAX_RECOMMENDATIONS)
        .cloned()
        .collect()
}
