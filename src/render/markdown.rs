//! Markdown rendering for extracted tables.

use crate::error::Result;
use crate::model::Table;

use super::RenderOptions;

/// Convert tables to GitHub-flavored Markdown.
pub fn to_markdown(tables: &[Table], options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(tables)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render tables to Markdown.
    pub fn render(&self, tables: &[Table]) -> Result<String> {
        let rendered: Vec<String> = tables
            .iter()
            .enumerate()
            .filter(|(_, table)| !table.is_empty())
            .map(|(idx, table)| {
                let mut output = String::new();
                if self.options.captions {
                    output.push_str(&format!("**Table {}**\n\n", idx + 1));
                }
                self.render_table(&mut output, table);
                output
            })
            .collect();

        Ok(rendered.join(&self.options.table_separator))
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        // Rows may be ragged; pad for display so every line has the same cell count.
        let width = table.column_count();
        if width == 0 {
            return;
        }

        let mut rows = table.rows.iter();
        if self.options.header_row {
            if let Some(header) = rows.next() {
                push_row(output, header, width);
            }
        } else {
            push_row(output, &[], width);
        }

        output.push('|');
        for _ in 0..width {
            output.push_str(" --- |");
        }
        output.push('\n');

        for row in rows {
            push_row(output, row, width);
        }
        // Drop the trailing newline; the separator handles spacing.
        output.pop();
    }
}

fn push_row(output: &mut String, cells: &[String], width: usize) {
    output.push('|');
    for idx in 0..width {
        let cell = cells.get(idx).map(String::as_str).unwrap_or("");
        let content = escape_cell(cell);
        if content.is_empty() {
            output.push_str("  |");
        } else {
            output.push_str(&format!(" {} |", content));
        }
    }
    output.push('\n');
}

/// Escape characters that would break a table cell.
fn escape_cell(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.trim().chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\\' => result.push_str("\\\\"),
            '\n' | '\r' => result.push(' '),
            _ => result.push(c),
        }
    }
    result
}
