use anyhow::{anyhow, Result};

use super::super::Container;

pub struct CheckController<'a> {
    container: &'a Container,
}

impl<'a> CheckController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Report on catalog and credential configuration. Errors when the
    /// recommendation service could not be used.
    pub fn check(&self) -> Result<String> {
        let catalog = self.container.catalog();
        let mut lines = vec![
            "ProRecc Environment".to_string(),
            "===================".to_string(),
            format!(
                "Catalog:      {} products ({})",
                catalog.len(),
                self.container.catalog_source()
            ),
            format!("Categories:   {}", catalog.categories().join(", ")),
        ];

        if self.container.uses_mock_generator() {
            lines.push("Generator:    scripted (--mock-response)".to_string());
            return Ok(lines.join("\n"));
        }

        match self.container.gemini_config() {
            Ok(config) => {
                lines.push("API key:      configured".to_string());
                lines.push(format!("Model:        {}", config.model()));
                lines.push(format!("Endpoint:     {}", config.base_url()));
                lines.push(format!("Timeout:      {}s", config.timeout().as_secs()));
                Ok(lines.join("\n"))
            }
            Err(e) => {
                lines.push("API key:      missing".to_string());
                lines.push(String::new());
                lines.push(e.user_message());
                Err(anyhow!(lines.join("\n")))
            }
        }
    }
}
