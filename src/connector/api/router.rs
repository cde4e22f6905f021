use anyhow::{bail, Result};

use crate::Commands;

use super::container::Container;
use super::controller::{CatalogController, CheckController, RecommendController};

pub struct Router<'a> {
    recommend_controller: RecommendController<'a>,
    catalog_controller: CatalogController<'a>,
    check_controller: CheckController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            recommend_controller: RecommendController::new(container),
            catalog_controller: CatalogController::new(container),
            check_controller: CheckController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Recommend { query, format } => {
                self.recommend_controller.recommend(query, format).await
            }
            Commands::Featured { format } => self.catalog_controller.featured(format),
            Commands::Category { name, format } => self.catalog_controller.category(name, format),
            Commands::Categories => self.catalog_controller.categories(),
            Commands::Check => self.check_controller.check(),
            Commands::Shell => bail!("the shell is interactive and is started from main"),
        }
    }
}
