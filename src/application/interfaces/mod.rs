mod catalog_repository;
mod text_generator;

pub use catalog_repository::*;
pub use text_generator::*;
