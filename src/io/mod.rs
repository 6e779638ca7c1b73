//! IO modules - collaborators around the ranking core
//!
//! This module contains all input and output handling:
//! - `query_input` - Parse and validate "x,y" coordinate text
//! - `generator` - Random facility generation
//! - `report` - Text and JSON rendering of ranked results

pub mod generator;
pub mod query_input;
pub mod report;

// Re-export commonly used types
pub use generator::{generate_facilities, resolve_seed, GeneratorError, GeneratorSettings};
pub use query_input::{parse_query_point, read_query_point, QueryParseError};
pub use report::{OutputFormat, Report};
