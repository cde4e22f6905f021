use serde::{Deserialize, Serialize};

/// A purchasable product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    id: String,
    name: String,
    price: f64,
    category: String,
    description: String,
    #[serde(default)]
    image_ref: String,
}

impl CatalogEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            description: description.into(),
            image_ref: String::new(),
        }
    }

    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category.trim())
    }

    /// One line of the inventory listing embedded in the recommendation prompt.
    pub fn prompt_line(&self) -> String {
        format!(
            "ID: {}, Name: {}, Price: ${}, Category: {}, Description: {}",
            self.id, self.name, self.price, self.category, self.description
        )
    }

    pub fn display_line(&self) -> String {
        format!("{} [{}] ${:.2}", self.name, self.category, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_line_matches_inventory_format() {
        let entry = CatalogEntry::new("5", "MacBook Air M3", 1099.0, "Laptops", "Thin and light");
        assert_eq!(
            entry.prompt_line(),
            "ID: 5, Name: MacBook Air M3, Price: $1099, Category: Laptops, Description: Thin and light"
        );
    }

    #[test]
    fn fractional_prices_keep_cents() {
        let entry = CatalogEntry::new("2", "Pixel 8", 699.99, "Smartphones", "Android");
        assert!(entry.prompt_line().contains("Price: $699.99"));
        assert_eq!(entry.display_line(), "Pixel 8 [Smartphones] $699.99");
    }

    #[test]
    fn category_match_ignores_case() {
        let entry = CatalogEntry::new("16", "Switch OLED", 349.0, "Gaming", "Handheld");
        assert!(entry.in_category("gaming"));
        assert!(entry.in_category(" GAMING "));
        assert!(!entry.in_category("Laptops"));
    }

    #[test]
    fn deserializes_camel_case_image_ref() {
        let json = r#"{"id":"1","name":"iPhone 15","price":799,"category":"Smartphones","description":"A16","imageRef":"/img/iphone.png"}"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.image_ref(), "/img/iphone.png");
        assert_eq!(entry.price(), 799.0);
    }
}
