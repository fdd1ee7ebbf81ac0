//! Loading datasets from delimited text files.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig, is_null_value};
pub use source::SourceMetadata;
