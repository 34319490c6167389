//! Block graph parsing and table reconstruction.

mod assembler;
mod options;
mod resolver;
mod response;

pub use assembler::{extract_tables, TableAssembler};
pub use options::{
    ColumnWidth, ErrorMode, ExtractOptions, RowPolicy, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INDEX,
    DEFAULT_MAX_VISITS,
};
pub use resolver::{resolve_text, TextResolver};
#[cfg(feature = "async")]
pub use response::parse_response_file_async;
pub use response::{
    parse_response_bytes, parse_response_file, parse_response_reader, parse_response_str,
};
