pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    BrowseCatalogUseCase, CatalogRepository, RecommendProductsUseCase, ShowcaseSession,
    TextGenerator,
};

pub use cli::{Commands, OutputFormat};

pub use connector::{
    Container, ContainerConfig, GeminiClient, GeminiConfig, InMemoryCatalog, Router,
    ScriptedGenerator, Shell,
};

pub use domain::{
    validate, CatalogEntry, CatalogError, ErrorKind, GenerationConfig, ParsedResponse,
    RecommendationError, ShowcaseView, ValidQuery, ValidationError,
};
