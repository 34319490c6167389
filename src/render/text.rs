//! Plain text rendering for extracted tables.

use crate::error::Result;
use crate::model::Table;

use super::RenderOptions;

/// Convert tables to tab-separated text, one line per row.
pub fn to_text(tables: &[Table], options: &RenderOptions) -> Result<String> {
    let rendered: Vec<String> = tables
        .iter()
        .enumerate()
        .filter(|(_, table)| !table.is_empty())
        .map(|(idx, table)| {
            if options.captions {
                format!("Table {}\n{}", idx + 1, table.plain_text())
            } else {
                table.plain_text()
            }
        })
        .collect();

    Ok(rendered.join(&options.table_separator))
}
