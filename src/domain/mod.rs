//! # Domain Layer
//!
//! Catalog and query models, the error taxonomy, and the pure parts of the
//! recommendation pipeline. Independent of HTTP and runtime concerns.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
