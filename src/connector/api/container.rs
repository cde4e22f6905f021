use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::{
    BrowseCatalogUseCase, CatalogRepository, RecommendProductsUseCase, ShowcaseSession,
    TextGenerator, DEFAULT_TIMEOUT,
};
use crate::connector::{GeminiClient, GeminiConfig, InMemoryCatalog, ScriptedGenerator};
use crate::domain::RecommendationError;

#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    /// JSON catalog to load instead of the bundled one.
    pub catalog_path: Option<PathBuf>,
    /// Overrides `GEMINI_TIMEOUT_SECS`.
    pub timeout: Option<Duration>,
    /// Overrides `GEMINI_MODEL`.
    pub model: Option<String>,
    /// Answer every prompt with this text instead of calling Gemini.
    pub mock_response: Option<String>,
}

pub struct Container {
    catalog: Arc<dyn CatalogRepository>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let catalog: Arc<dyn CatalogRepository> = match config.catalog_path.as_ref() {
            Some(path) => Arc::new(
                InMemoryCatalog::from_path(path)
                    .with_context(|| format!("failed to load catalog from {}", path.display()))?,
            ),
            None => {
                debug!("Using bundled catalog");
                Arc::new(InMemoryCatalog::bundled().context("bundled catalog is invalid")?)
            }
        };

        Ok(Self::with_catalog(catalog, config))
    }

    pub fn with_catalog(catalog: Arc<dyn CatalogRepository>, config: ContainerConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog.clone()
    }

    pub fn catalog_source(&self) -> String {
        self.config
            .catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "bundled".to_string())
    }

    pub fn uses_mock_generator(&self) -> bool {
        self.config.mock_response.is_some()
    }

    /// Gemini settings from the environment with CLI overrides applied.
    pub fn gemini_config(&self) -> Result<GeminiConfig, RecommendationError> {
        let mut config = GeminiConfig::from_env()?;
        if let Some(model) = self.config.model.as_ref() {
            config = config.with_model(model.clone());
        }
        if let Some(timeout) = self.config.timeout {
            config = config.with_timeout(timeout);
        }
        Ok(config)
    }

    pub fn browse_use_case(&self) -> BrowseCatalogUseCase {
        BrowseCatalogUseCase::new(self.catalog.clone())
    }

    /// Fails fast with [`RecommendationError::MissingCredential`] when no
    /// scripted response is configured and `GEMINI_API_KEY` is unset.
    pub fn recommend_use_case(&self) -> Result<RecommendProductsUseCase, RecommendationError> {
        let (generator, timeout): (Arc<dyn TextGenerator>, Duration) =
            match self.config.mock_response.as_ref() {
                Some(response) => {
                    debug!("Using scripted text generator");
                    (
                        Arc::new(ScriptedGenerator::new(response.clone())),
                        self.config.timeout.unwrap_or(DEFAULT_TIMEOUT),
                    )
                }
                None => {
                    let config = self.gemini_config()?;
                    debug!("Using Gemini model {} at {}", config.model(), config.base_url());
                    let timeout = config.timeout();
                    (Arc::new(GeminiClient::new(config)), timeout)
                }
            };

        Ok(RecommendProductsUseCase::new(self.catalog.clone(), generator).with_timeout(timeout))
    }

    pub fn session(&self) -> Result<ShowcaseSession, RecommendationError> {
        let recommender = Arc::new(self.recommend_use_case()?);
        Ok(ShowcaseSession::new(self.browse_use_case(), recommender))
    }
}
