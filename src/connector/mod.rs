//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Text generation (Gemini over HTTP, scripted generator for offline use)
//! - Catalog loading (in-memory, from JSON)
//! - CLI wiring (container, router, controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
