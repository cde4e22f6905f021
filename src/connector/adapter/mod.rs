mod gemini_client;
mod in_memory_catalog;
mod scripted_generator;

pub use gemini_client::*;
pub use in_memory_catalog::*;
pub use scripted_generator::*;
