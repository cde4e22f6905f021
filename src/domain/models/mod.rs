mod catalog_entry;
mod generation_config;
mod query;
mod showcase_view;

pub use catalog_entry::*;
pub use generation_config::*;
pub use query::*;
pub use showcase_view::*;
