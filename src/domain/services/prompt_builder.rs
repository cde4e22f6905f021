use crate::domain::{CatalogEntry, ValidQuery};

/// Marker the model is told to return verbatim when nothing in the inventory fits.
pub const NO_PRODUCTS_SENTINEL: &str = "NO_PRODUCTS_AVAILABLE";

pub const MIN_RECOMMENDATIONS: usize = 3;
pub const MAX_RECOMMENDATIONS: usize = 8;

/// Build the full recommendation prompt for `query` over `entries`.
///
/// The inventory is listed one entry per line. The instructions pin the model
/// to listed IDs only, to a JSON array of ID strings in relevance order, and to
/// [`NO_PRODUCTS_SENTINEL`] when nothing matches.
pub fn build_recommendation_prompt(query: &ValidQuery, entries: &[CatalogEntry]) -> String {
    let inventory = entries
        .iter()
        .map(CatalogEntry::prompt_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\
You are a product recommendation expert for an e-commerce store. Based on the user's preferences, recommend the most suitable products from the available inventory ONLY.

User Query: \"{query}\"

Available Products in Inventory:
{inventory}

Instructions:
1. Analyze the user's preferences carefully (budget, category, features, etc.)
2. ONLY recommend products that are actually available in the inventory above
3. If the user asks for products that don't exist in our inventory, respond with exactly: \"{sentinel}\"
4. If you find suitable matches, select {min}-{max} most relevant products that best match their needs
5. Consider price range, category preferences, and specific features mentioned
6. Prioritize products that offer the best value for their stated requirements

Response Format:
- If suitable products found: Return ONLY a JSON array of product IDs (as strings) in order of relevance. Example: [\"1\", \"5\", \"12\"]
- If no suitable products found: Return exactly \"{sentinel}\"

Do not include any explanation or additional text - just the JSON array or the {sentinel} message.",
        query = query.as_str(),
        inventory = inventory,
        sentinel = NO_PRODUCTS_SENTINEL,
        min = MIN_RECOMMENDATIONS,
        max = MAX_RECOMMENDATIONS,
    )
}
