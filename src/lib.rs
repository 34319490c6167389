//! # untextract
//!
//! Table reconstruction from document-analysis block graphs.
//!
//! Document-analysis services return a flat list of blocks (`TABLE`,
//! `CELL`, `WORD`, ...) linked by `CHILD` relationships, with 1-based row
//! and column indices on cells. This library turns that graph back into
//! ordered tables of cell text.
//!
//! ## Quick Start
//!
//! ```no_run
//! use untextract::{parse_response_file, render, ExtractionResult};
//!
//! fn main() -> untextract::Result<()> {
//!     // Load a saved AnalyzeDocument response
//!     let blocks = parse_response_file("response.json")?;
//!
//!     // Rebuild the tables
//!     let tables = untextract::extract_tables(&blocks);
//!
//!     // Serialize as {"tables": [...], "count": n}
//!     let result = ExtractionResult::new(tables);
//!     println!("{}", render::to_json(&result, render::JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Bounded text resolution**: cyclic or very deep graphs terminate
//! - **Fault isolation**: a malformed cell or table never discards the rest
//! - **Configurable grids**: per-row or table-wide widths, compact or positional rows
//! - **Output formats**: JSON, Markdown, tab-separated text
//! - **Analyzer seam**: plug a service client in behind [`analyze::DocumentAnalyzer`]

pub mod analyze;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use analyze::{
    AnalyzerHandle, DocumentAnalyzer, HealthStatus, RecordedAnalyzer, TableExtractor,
};
pub use detect::{
    detect_kind_from_bytes, validate_bytes, validate_path, DocumentKind, UploadPolicy,
};
pub use error::{BlockFault, Error, Result};
pub use model::{
    Block, BlockCollection, BlockType, Diagnostic, ExtractionResult, Relationship,
    RelationshipType, Table,
};
#[cfg(feature = "async")]
pub use parser::parse_response_file_async;
pub use parser::{
    extract_tables, parse_response_bytes, parse_response_file, parse_response_reader,
    parse_response_str, resolve_text, ColumnWidth, ErrorMode, ExtractOptions, RowPolicy,
    TableAssembler, TextResolver,
};
pub use render::{ExtractionStats, JsonFormat, RenderOptions};

use std::io::Read;
use std::path::Path;

/// Extract tables from a block collection with custom options.
///
/// # Example
///
/// ```
/// use untextract::{extract_tables_with_options, BlockCollection, ExtractOptions};
///
/// let result = extract_tables_with_options(&BlockCollection::new(), &ExtractOptions::new())?;
/// assert_eq!(result.count, 0);
/// # Ok::<(), untextract::Error>(())
/// ```
pub fn extract_tables_with_options(
    blocks: &BlockCollection,
    options: &ExtractOptions,
) -> Result<ExtractionResult> {
    TableAssembler::new(options.clone()).extract(blocks)
}

/// Extract tables from a saved service response.
///
/// # Example
///
/// ```no_run
/// use untextract::extract_tables_from_file;
///
/// let result = extract_tables_from_file("response.json").unwrap();
/// println!("Tables: {}", result.count);
/// ```
pub fn extract_tables_from_file<P: AsRef<Path>>(path: P) -> Result<ExtractionResult> {
    let blocks = parse_response_file(path)?;
    extract_tables_with_options(&blocks, &ExtractOptions::default())
}

/// Extract tables from a service response held in memory.
pub fn extract_tables_from_bytes(data: &[u8]) -> Result<ExtractionResult> {
    let blocks = parse_response_bytes(data)?;
    extract_tables_with_options(&blocks, &ExtractOptions::default())
}

/// Convert a saved service response to Markdown tables.
///
/// # Example
///
/// ```no_run
/// use untextract::to_markdown;
///
/// let markdown = to_markdown("response.json").unwrap();
/// std::fs::write("tables.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let result = extract_tables_from_file(path)?;
    render::to_markdown(&result.tables, &RenderOptions::default())
}

/// Convert a saved service response to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let result = extract_tables_from_file(path)?;
    render::to_json(&result, format)
}

/// Builder for extracting and rendering tables.
///
/// # Example
///
/// ```no_run
/// use untextract::{ColumnWidth, Untextract};
///
/// let markdown = Untextract::new()
///     .strict()
///     .with_column_width(ColumnWidth::TableWide)
///     .with_captions()
///     .parse("response.json")?
///     .to_markdown()?;
/// # Ok::<(), untextract::Error>(())
/// ```
pub struct Untextract {
    extract_options: ExtractOptions,
    render_options: RenderOptions,
}

impl Untextract {
    /// Create a new Untextract builder.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Abort on the first malformed cell.
    pub fn strict(mut self) -> Self {
        self.extract_options = self.extract_options.strict();
        self
    }

    /// Skip malformed cells.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Set the text resolution depth limit.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.extract_options = self.extract_options.with_max_depth(depth);
        self
    }

    /// Set the column width policy.
    pub fn with_column_width(mut self, width: ColumnWidth) -> Self {
        self.extract_options = self.extract_options.with_column_width(width);
        self
    }

    /// Set the row policy.
    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.extract_options = self.extract_options.with_row_policy(policy);
        self
    }

    /// Set whether the first row is rendered as a header.
    pub fn with_header_row(mut self, header: bool) -> Self {
        self.render_options = self.render_options.with_header_row(header);
        self
    }

    /// Prefix rendered tables with `Table N` captions.
    pub fn with_captions(mut self) -> Self {
        self.render_options = self.render_options.with_captions(true);
        self
    }

    /// Extract tables from a saved response file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UntextractResult> {
        let blocks = parse_response_file(path)?;
        self.extract(&blocks)
    }

    /// Extract tables from response bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UntextractResult> {
        let blocks = parse_response_bytes(data)?;
        self.extract(&blocks)
    }

    /// Extract tables from a reader yielding a response.
    pub fn parse_reader<R: Read>(self, reader: R) -> Result<UntextractResult> {
        let blocks = parse_response_reader(reader)?;
        self.extract(&blocks)
    }

    /// Extract tables from an already decoded collection.
    pub fn extract(self, blocks: &BlockCollection) -> Result<UntextractResult> {
        let result = extract_tables_with_options(blocks, &self.extract_options)?;
        Ok(UntextractResult {
            result,
            render_options: self.render_options,
        })
    }
}

impl Default for Untextract {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of extracting tables from a response.
pub struct UntextractResult {
    /// The extracted tables
    pub result: ExtractionResult,
    /// Render options to use
    render_options: RenderOptions,
}

impl UntextractResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.result.tables, &self.render_options)
    }

    /// Convert to tab-separated text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.result.tables, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.result, format)
    }

    /// Statistics over the extracted tables.
    pub fn stats(&self) -> ExtractionStats {
        ExtractionStats::from_result(&self.result)
    }

    /// Get the tables.
    pub fn tables(&self) -> &[Table] {
        &self.result.tables
    }
}
