//! Pure recommendation logic: prompt construction, response parsing and ID
//! resolution. No I/O happens here.

mod id_resolver;
mod prompt_builder;
mod response_parser;

pub use id_resolver::*;
pub use prompt_builder::*;
pub use response_parser::*;
