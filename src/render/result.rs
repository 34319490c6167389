//! Statistics over extraction results.

use crate::model::ExtractionResult;
use serde::{Deserialize, Serialize};

/// Statistics collected from extracted tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of tables
    pub table_count: u32,

    /// Number of rows across all tables
    pub row_count: u32,

    /// Number of cells across all tables
    pub cell_count: u32,

    /// Number of cells with non-blank text
    pub filled_cell_count: u32,

    /// Number of tables whose rows differ in length
    pub ragged_table_count: u32,

    /// Number of faults absorbed during extraction
    pub diagnostic_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a result.
    pub fn from_result(result: &ExtractionResult) -> Self {
        let mut stats = Self::new();
        for table in &result.tables {
            stats.table_count += 1;
            stats.row_count += table.row_count() as u32;
            stats.cell_count += table.cell_count() as u32;
            stats.filled_cell_count += table
                .rows
                .iter()
                .flatten()
                .filter(|cell| !cell.trim().is_empty())
                .count() as u32;
            if !table.is_rectangular() {
                stats.ragged_table_count += 1;
            }
        }
        stats.diagnostic_count = result.diagnostics.len() as u32;
        stats
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.table_count += other.table_count;
        self.row_count += other.row_count;
        self.cell_count += other.cell_count;
        self.filled_cell_count += other.filled_cell_count;
        self.ragged_table_count += other.ragged_table_count;
        self.diagnostic_count += other.diagnostic_count;
    }
}
