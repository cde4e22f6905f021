use anyhow::{bail, Result};

use crate::cli::OutputFormat;
use crate::domain::ShowcaseView;

use super::super::Container;
use super::listing::render_entries;

pub struct CatalogController<'a> {
    container: &'a Container,
}

impl<'a> CatalogController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub fn featured(&self, format: OutputFormat) -> Result<String> {
        let entries = self.container.browse_use_case().featured();
        render_entries(&ShowcaseView::Featured.title(), &entries, format)
    }

    pub fn category(&self, name: String, format: OutputFormat) -> Result<String> {
        let use_case = self.container.browse_use_case();
        let Some(name) = use_case.resolve_category(&name) else {
            bail!(
                "Unknown category \"{}\". Available categories: {}",
                name.trim(),
                use_case.categories().join(", ")
            );
        };

        let entries = use_case.by_category(&name);
        render_entries(&ShowcaseView::Category { name }.title(), &entries, format)
    }

    pub fn categories(&self) -> Result<String> {
        let use_case = self.container.browse_use_case();
        let lines: Vec<String> = use_case
            .categories()
            .into_iter()
            .map(|c| {
                let count = use_case.by_category(&c).len();
                format!("  {c} ({count})")
            })
            .collect();

        Ok(format!("Categories:\n\n{}", lines.join("\n")))
    }
}
