use anyhow::Result;

use crate::cli::OutputFormat;
use crate::domain::ShowcaseView;

use super::super::Container;
use super::listing::render_entries;

pub struct RecommendController<'a> {
    container: &'a Container,
}

impl<'a> RecommendController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn recommend(&self, query: String, format: OutputFormat) -> Result<String> {
        let use_case = self.container.recommend_use_case()?;
        let entries = use_case.recommend_raw(&query).await?;

        let heading = ShowcaseView::Recommendations { query }.title();
        render_entries(&heading, &entries, format)
    }
}
