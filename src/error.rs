//! Error types for untextract library.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Result type alias for untextract operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Request-level errors.
///
/// These abort a whole extraction call. Faults confined to a single block or
/// table are reported as [`BlockFault`] diagnostics instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The analysis payload is not valid JSON or has the wrong shape.
    #[error("Invalid analysis response: {0}")]
    Json(#[from] serde_json::Error),

    /// The analysis response carried no blocks at all.
    #[error("No blocks found in analysis response")]
    NoBlocks,

    /// The document-analysis service call failed.
    #[error("Document analysis failed: {0}")]
    Upstream(String),

    /// No document analyzer is configured.
    #[error("Document analyzer unavailable: {0}")]
    AnalyzerUnavailable(String),

    /// The uploaded file type is not accepted.
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// The uploaded file exceeds the size limit.
    #[error("File too large: {size} bytes (maximum is {limit} bytes)")]
    FileTooLarge {
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// The uploaded file has no content.
    #[error("Document is empty")]
    EmptyDocument,

    /// A block lacks a field required by its type (strict mode only).
    #[error("Malformed block {block_id}: {reason}")]
    MalformedBlock {
        /// Id of the offending block
        block_id: String,
        /// What is wrong with it
        reason: String,
    },

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

/// A fault absorbed while resolving text or assembling a table.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockFault {
    /// A relationship edge points to an unknown block id.
    #[error("missing block reference")]
    MissingReference,

    /// A TABLE block produced no cell observations.
    #[error("table has no cells")]
    EmptyTable,

    /// A block lacks a field expected for its type.
    #[error("malformed block: {0}")]
    MalformedBlock(String),

    /// Text resolution went deeper than the configured limit.
    #[error("resolution depth limit {limit} exceeded")]
    ResolutionDepthExceeded {
        /// The configured depth limit
        limit: usize,
    },

    /// Text resolution visited more blocks than the configured budget.
    #[error("resolution visit budget {limit} exhausted")]
    ResolutionBudgetExceeded {
        /// The configured visit budget
        limit: usize,
    },

    /// Text resolution revisited a block already on the current path.
    #[error("cyclic child reference")]
    CyclicReference,
}
