mod browse_catalog;
mod recommend_products;
mod showcase_session;

pub use browse_catalog::*;
pub use recommend_products::*;
pub use showcase_session::*;
