pub mod catalog_controller;
pub mod check_controller;
mod listing;
pub mod recommend_controller;

pub use catalog_controller::CatalogController;
pub use check_controller::CheckController;
pub use listing::render_entries;
pub use recommend_controller::RecommendController;
