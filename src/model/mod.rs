//! Data model for block graphs and reconstructed tables.
//!
//! The block types mirror the document-analysis response; the table types
//! are what extraction produces.

mod block;
mod table;

pub use block::{Block, BlockCollection, BlockType, Relationship, RelationshipType};
pub use table::{Diagnostic, ExtractionResult, Table};
