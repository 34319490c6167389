//! Extraction options and configuration.

/// Default bound on text resolution depth.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default bound on blocks visited while resolving one cell's text.
pub const DEFAULT_MAX_VISITS: usize = 10_000;

/// Default bound on a cell's 1-based row or column index.
pub const DEFAULT_MAX_INDEX: u32 = 4096;

/// Options for extracting tables from a block graph.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Maximum depth of `CHILD` traversal when resolving text
    pub max_depth: usize,

    /// Maximum number of blocks visited when resolving one cell's text
    pub max_visits: usize,

    /// Largest accepted `RowIndex` or `ColumnIndex`
    pub max_index: u32,

    /// How wide each emitted row is
    pub column_width: ColumnWidth,

    /// Which rows are emitted
    pub row_policy: RowPolicy,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Abort the whole extraction on the first malformed cell.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Skip malformed cells and keep going.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the text resolution depth limit.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the per-cell visit budget for text resolution.
    pub fn with_max_visits(mut self, visits: usize) -> Self {
        self.max_visits = visits;
        self
    }

    /// Set the largest accepted row or column index.
    pub fn with_max_index(mut self, index: u32) -> Self {
        self.max_index = index;
        self
    }

    /// Set the column width policy.
    pub fn with_column_width(mut self, width: ColumnWidth) -> Self {
        self.column_width = width;
        self
    }

    /// Set the row policy.
    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.row_policy = policy;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            max_depth: DEFAULT_MAX_DEPTH,
            max_visits: DEFAULT_MAX_VISITS,
            max_index: DEFAULT_MAX_INDEX,
            column_width: ColumnWidth::PerRow,
            row_policy: RowPolicy::Compact,
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the whole call on the first malformed cell
    Strict,
    /// Skip malformed cells, isolating faults to their table
    #[default]
    Lenient,
}

/// Width of each emitted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnWidth {
    /// Each row is as wide as its own rightmost observed column
    #[default]
    PerRow,
    /// Every row is as wide as the table's rightmost observed column
    TableWide,
}

/// Which row indices appear in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Omit row indices with no cells and rows whose cells are all blank
    #[default]
    Compact,
    /// Emit every row index from 1 to the last observed row
    Positional,
}
