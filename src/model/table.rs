//! Table types.

use crate::error::BlockFault;
use serde::{Deserialize, Serialize};

/// A reconstructed table: rows of cell text.
///
/// Serializes as a plain array of arrays of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    /// Rows in the table, each an ordered list of cell strings
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows of text values.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (widest row; rows may differ in length).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Total number of cells across all rows.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if every row has the same length.
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|r| r.len() == width)
    }

    /// Get a cell by 0-based position.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A fault absorbed during extraction, tied to the block it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Id of the block where the fault was observed
    pub block_id: String,
    /// What went wrong
    pub fault: BlockFault,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(block_id: impl Into<String>, fault: BlockFault) -> Self {
        Self {
            block_id: block_id.into(),
            fault,
        }
    }
}

/// Tables extracted from one analysis response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Retained tables in input order
    pub tables: Vec<Table>,

    /// Number of retained tables
    pub count: usize,

    /// Faults absorbed while extracting
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ExtractionResult {
    /// Create a result from tables, keeping `count` in sync.
    pub fn new(tables: Vec<Table>) -> Self {
        let count = tables.len();
        Self {
            tables,
            count,
            diagnostics: Vec::new(),
        }
    }

    /// Attach diagnostics and return self.
    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Check if no tables were found.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Consume the result and return the tables.
    pub fn into_tables(self) -> Vec<Table> {
        self.tables
    }
}
