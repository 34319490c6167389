//! Table assembly from `TABLE` and `CELL` blocks.
//!
//! Each `TABLE` block lists its cells through `CHILD` edges. Cells carry
//! 1-based row and column indices; the assembler collects the sparse
//! `(row, column) -> text` observations and densifies them into rows.

use std::collections::BTreeMap;

use crate::error::{BlockFault, Error, Result};
use crate::model::{Block, BlockCollection, Diagnostic, ExtractionResult, Table};

use super::options::{ColumnWidth, ErrorMode, ExtractOptions, RowPolicy};
use super::resolver::TextResolver;

/// Cell text keyed by row, then column.
type Observations = BTreeMap<u32, BTreeMap<u32, String>>;

/// Extract all tables from a block collection with default options.
///
/// # Example
///
/// ```
/// use untextract::model::{Block, BlockCollection};
/// use untextract::extract_tables;
///
/// let blocks = BlockCollection::from_blocks(vec![
///     Block::table("t1").with_children(["c1", "c2"]),
///     Block::cell("c1", 1, 1).with_text("Item"),
///     Block::cell("c2", 1, 2).with_text("Qty"),
/// ]);
/// let tables = extract_tables(&blocks);
/// assert_eq!(tables[0].rows, vec![vec!["Item", "Qty"]]);
/// ```
pub fn extract_tables(blocks: &BlockCollection) -> Vec<Table> {
    // Lenient mode absorbs every per-block fault.
    TableAssembler::new(ExtractOptions::default().lenient())
        .extract(blocks)
        .map(ExtractionResult::into_tables)
        .unwrap_or_default()
}

/// Builds dense tables from a block graph.
#[derive(Debug, Clone, Default)]
pub struct TableAssembler {
    options: ExtractOptions,
}

impl TableAssembler {
    /// Create an assembler with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract every non-empty table, in input order.
    ///
    /// Only fails in strict mode, on the first malformed cell.
    pub fn extract(&self, blocks: &BlockCollection) -> Result<ExtractionResult> {
        let resolver = TextResolver::new(blocks)
            .with_max_depth(self.options.max_depth)
            .with_max_visits(self.options.max_visits);
        let mut tables = Vec::new();
        let mut diagnostics = Vec::new();

        let table_blocks: Vec<&Block> = blocks.tables().collect();
        if table_blocks.is_empty() {
            log::info!("No tables found in the document");
            return Ok(ExtractionResult::default());
        }

        for (idx, table_block) in table_blocks.iter().enumerate() {
            let number = idx + 1;
            log::info!("Processing table {}", number);

            let mut table_diagnostics = Vec::new();
            let observations =
                self.collect_cells(table_block, blocks, &resolver, &mut table_diagnostics)?;
            for diagnostic in &table_diagnostics {
                log::warn!(
                    "Table {}: block {}: {}",
                    number,
                    diagnostic.block_id,
                    diagnostic.fault
                );
            }
            diagnostics.extend(table_diagnostics);

            if observations.is_empty() {
                log::warn!("No rows found in table {}", number);
                diagnostics.push(Diagnostic::new(&table_block.id, BlockFault::EmptyTable));
                continue;
            }

            let table = self.densify(&observations);
            if table.is_empty() {
                log::info!("Table {} has only blank rows, skipping", number);
                continue;
            }

            log::info!("Extracted table {} with {} rows", number, table.row_count());
            tables.push(table);
        }

        log::info!("Extracted {} tables", tables.len());
        Ok(ExtractionResult::new(tables).with_diagnostics(diagnostics))
    }

    /// Collect trimmed cell text for one table; later cells overwrite earlier
    /// ones at the same position.
    fn collect_cells(
        &self,
        table: &Block,
        blocks: &BlockCollection,
        resolver: &TextResolver<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Observations> {
        let mut observations = Observations::new();

        for cell_id in table.child_ids() {
            let Some(cell) = blocks.get(cell_id) else {
                diagnostics.push(Diagnostic::new(cell_id, BlockFault::MissingReference));
                continue;
            };
            if !cell.is_cell() {
                continue;
            }

            let (row, column) = match cell_position(cell, self.options.max_index) {
                Ok(position) => position,
                Err(reason) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(Error::MalformedBlock {
                            block_id: cell.id.clone(),
                            reason,
                        });
                    }
                    diagnostics.push(Diagnostic::new(
                        &cell.id,
                        BlockFault::MalformedBlock(reason),
                    ));
                    continue;
                }
            };

            let text = resolver.resolve_into(&cell.id, diagnostics);
            log::debug!("Cell {} at ({}, {}): {:?}", cell.id, row, column, text);
            observations
                .entry(row)
                .or_default()
                .insert(column, text.trim().to_string());
        }

        Ok(observations)
    }

    /// Turn sparse observations into rows per the width and row policies.
    fn densify(&self, observations: &Observations) -> Table {
        let max_row = observations.keys().next_back().copied().unwrap_or(0);
        let table_width = observations
            .values()
            .filter_map(|cols| cols.keys().next_back().copied())
            .max()
            .unwrap_or(0);

        let mut table = Table::new();
        match self.options.row_policy {
            // Only observed rows can be emitted, so walk the map instead of the index range.
            RowPolicy::Compact => {
                for cols in observations.values() {
                    let row = self.dense_row(cols, table_width);
                    if !row.iter().all(|cell| cell.trim().is_empty()) {
                        table.add_row(row);
                    }
                }
            }
            RowPolicy::Positional => {
                for row_idx in 1..=max_row {
                    let row = match observations.get(&row_idx) {
                        Some(cols) => self.dense_row(cols, table_width),
                        None => match self.options.column_width {
                            ColumnWidth::PerRow => Vec::new(),
                            ColumnWidth::TableWide => vec![String::new(); table_width as usize],
                        },
                    };
                    table.add_row(row);
                }
            }
        }

        table
    }

    /// One row filled with empty strings up to the width policy's column.
    fn dense_row(&self, cols: &BTreeMap<u32, String>, table_width: u32) -> Vec<String> {
        let width = match self.options.column_width {
            ColumnWidth::PerRow => cols.keys().next_back().copied().unwrap_or(0),
            ColumnWidth::TableWide => table_width,
        };
        (1..=width)
            .map(|col| cols.get(&col).cloned().unwrap_or_default())
            .collect()
    }
}

/// Validated 1-based position of a cell, at most `max_index` on either axis.
fn cell_position(cell: &Block, max_index: u32) -> std::result::Result<(u32, u32), String> {
    let row = cell.row_index.ok_or("missing RowIndex")?;
    let column = cell.column_index.ok_or("missing ColumnIndex")?;
    if row == 0 || column == 0 {
        return Err(format!("cell index ({}, {}) is not 1-based", row, column));
    }
    if row > max_index || column > max_index {
        return Err(format!(
            "cell index ({}, {}) exceeds limit {}",
            row, column, max_index
        ));
    }
    Ok((row, column))
}
