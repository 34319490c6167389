//! Rendering options and configuration.

/// Options for rendering tables as Markdown or text.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Treat the first row of each table as its header
    pub header_row: bool,

    /// Text placed between consecutive tables
    pub table_separator: String,

    /// Prefix each table with a `Table N` caption
    pub captions: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the header row.
    pub fn with_header_row(mut self, header: bool) -> Self {
        self.header_row = header;
        self
    }

    /// Set the separator between tables.
    pub fn with_table_separator(mut self, separator: impl Into<String>) -> Self {
        self.table_separator = separator.into();
        self
    }

    /// Enable or disable `Table N` captions.
    pub fn with_captions(mut self, captions: bool) -> Self {
        self.captions = captions;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            header_row: true,
            table_separator: "\n\n".to_string(),
            captions: false,
        }
    }
}
