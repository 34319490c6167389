//! Block graph types.
//!
//! A document-analysis response is a flat list of blocks connected by
//! relationship edges. Edges refer to other blocks by id only, so every
//! traversal goes through a [`BlockCollection`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Kind of a block.
///
/// Kinds the service may add later decode as [`BlockType::Other`] instead of
/// failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    /// A page of the document
    Page,
    /// A line of text
    Line,
    /// A single word
    Word,
    /// A table
    Table,
    /// A table cell
    Cell,
    /// A group of cells merged into one
    MergedCell,
    /// A checkbox or radio button
    SelectionElement,
    /// A form key or value
    KeyValueSet,
    /// Any other service-defined kind
    Other(String),
}

impl BlockType {
    /// Wire name of this block type.
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Page => "PAGE",
            BlockType::Line => "LINE",
            BlockType::Word => "WORD",
            BlockType::Table => "TABLE",
            BlockType::Cell => "CELL",
            BlockType::MergedCell => "MERGED_CELL",
            BlockType::SelectionElement => "SELECTION_ELEMENT",
            BlockType::KeyValueSet => "KEY_VALUE_SET",
            BlockType::Other(name) => name,
        }
    }
}

impl From<String> for BlockType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PAGE" => BlockType::Page,
            "LINE" => BlockType::Line,
            "WORD" => BlockType::Word,
            "TABLE" => BlockType::Table,
            "CELL" => BlockType::Cell,
            "MERGED_CELL" => BlockType::MergedCell,
            "SELECTION_ELEMENT" => BlockType::SelectionElement,
            "KEY_VALUE_SET" => BlockType::KeyValueSet,
            _ => BlockType::Other(value),
        }
    }
}

impl From<&str> for BlockType {
    fn from(value: &str) -> Self {
        BlockType::from(value.to_string())
    }
}

impl From<BlockType> for String {
    fn from(value: BlockType) -> Self {
        match value {
            BlockType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a relationship edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipType {
    /// Composition: table to cells, cell to words
    Child,
    /// Key to value in a form
    Value,
    /// Table to merged cells
    MergedCell,
    /// Block to its title
    Title,
    /// Table to its title
    TableTitle,
    /// Table to its footer
    TableFooter,
    /// Query to answer
    Answer,
    /// Any other service-defined kind
    Other(String),
}

impl RelationshipType {
    /// Wire name of this relationship type.
    pub fn as_str(&self) -> &str {
        match self {
            RelationshipType::Child => "CHILD",
            RelationshipType::Value => "VALUE",
            RelationshipType::MergedCell => "MERGED_CELL",
            RelationshipType::Title => "TITLE",
            RelationshipType::TableTitle => "TABLE_TITLE",
            RelationshipType::TableFooter => "TABLE_FOOTER",
            RelationshipType::Answer => "ANSWER",
            RelationshipType::Other(name) => name,
        }
    }
}

impl From<String> for RelationshipType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "CHILD" => RelationshipType::Child,
            "VALUE" => RelationshipType::Value,
            "MERGED_CELL" => RelationshipType::MergedCell,
            "TITLE" => RelationshipType::Title,
            "TABLE_TITLE" => RelationshipType::TableTitle,
            "TABLE_FOOTER" => RelationshipType::TableFooter,
            "ANSWER" => RelationshipType::Answer,
            _ => RelationshipType::Other(value),
        }
    }
}

impl From<RelationshipType> for String {
    fn from(value: RelationshipType) -> Self {
        match value {
            RelationshipType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// A directed edge from a block to one or more other blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireRelationship")]
pub struct Relationship {
    /// Edge kind
    #[serde(rename = "Type")]
    pub relationship_type: RelationshipType,

    /// Referenced block ids, in service order
    #[serde(rename = "Ids")]
    pub ids: Vec<String>,
}

impl Relationship {
    /// Create a `CHILD` edge.
    pub fn child<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            relationship_type: RelationshipType::Child,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if this is a `CHILD` edge.
    pub fn is_child(&self) -> bool {
        self.relationship_type == RelationshipType::Child
    }
}

/// Relationship as it appears on the wire; some payloads carry a lone `Id`.
#[derive(Deserialize)]
struct WireRelationship {
    #[serde(rename = "Type")]
    relationship_type: RelationshipType,
    #[serde(rename = "Ids", default)]
    ids: Option<Vec<String>>,
    #[serde(rename = "Id", default)]
    id: Option<String>,
}

impl From<WireRelationship> for Relationship {
    fn from(wire: WireRelationship) -> Self {
        let ids = match (wire.ids, wire.id) {
            (Some(ids), _) => ids,
            (None, Some(id)) => vec![id],
            (None, None) => Vec::new(),
        };
        Self {
            relationship_type: wire.relationship_type,
            ids,
        }
    }
}

/// A node of the block graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    /// Opaque id, unique within one response
    pub id: String,

    /// Block kind
    pub block_type: BlockType,

    /// Literal text on leaf blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// 1-based row index (cells only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    /// 1-based column index (cells only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,

    /// Rows spanned (cells only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,

    /// Columns spanned (cells only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,

    /// Service confidence, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Page number the block was found on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// `SELECTED` / `NOT_SELECTED` for selection elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_status: Option<String>,

    /// Outgoing edges
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

impl Block {
    /// Create a block with no text, indices or edges.
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type,
            text: None,
            row_index: None,
            column_index: None,
            row_span: None,
            column_span: None,
            confidence: None,
            page: None,
            selection_status: None,
            relationships: Vec::new(),
        }
    }

    /// Create a `WORD` block carrying text.
    pub fn word(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockType::Word).with_text(text)
    }

    /// Create a `CELL` block at the given 1-based position.
    pub fn cell(id: impl Into<String>, row: u32, column: u32) -> Self {
        let mut block = Self::new(id, BlockType::Cell);
        block.row_index = Some(row);
        block.column_index = Some(column);
        block
    }

    /// Create a `TABLE` block.
    pub fn table(id: impl Into<String>) -> Self {
        Self::new(id, BlockType::Table)
    }

    /// Set literal text and return self.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add a `CHILD` edge and return self.
    pub fn with_children<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.relationships.push(Relationship::child(ids));
        self
    }

    /// Ids referenced by `CHILD` edges, in listed order.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|r| r.is_child())
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }

    /// Check if the block has at least one `CHILD` edge.
    pub fn has_children(&self) -> bool {
        self.relationships.iter().any(Relationship::is_child)
    }

    /// Check if this is a `TABLE` block.
    pub fn is_table(&self) -> bool {
        self.block_type == BlockType::Table
    }

    /// Check if this is a `CELL` block.
    pub fn is_cell(&self) -> bool {
        self.block_type == BlockType::Cell
    }
}

/// All blocks of one analysis response, indexed by id.
///
/// Iteration follows input order. When ids collide, lookups return the last
/// block with that id.
#[derive(Debug, Clone, Default)]
pub struct BlockCollection {
    blocks: Vec<Block>,
    index: HashMap<String, usize>,
}

impl BlockCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from blocks in input order.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let index = blocks
            .iter()
            .enumerate()
            .map(|(pos, block)| (block.id.clone(), pos))
            .collect();
        Self { blocks, index }
    }

    /// Look up a block by id.
    pub fn get(&self, id: &str) -> Option<&Block> {
        self.index.get(id).map(|&pos| &self.blocks[pos])
    }

    /// Check if a block id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate blocks in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// `TABLE` blocks in input order.
    pub fn tables(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_table())
    }

    /// Number of blocks, duplicates included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the collection has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks per type, ordered by type.
    pub fn count_by_type(&self) -> BTreeMap<BlockType, usize> {
        let mut counts = BTreeMap::new();
        for block in &self.blocks {
            *counts.entry(block.block_type.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Consume the collection and return the blocks.
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}

impl FromIterator<Block> for BlockCollection {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self::from_blocks(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BlockCollection {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_wire_names() {
        assert_eq!(BlockType::from("TABLE"), BlockType::Table);
        assert_eq!(BlockType::from("SELECTION_ELEMENT"), BlockType::SelectionElement);
        assert_eq!(
            BlockType::from("SIGNATURE"),
            BlockType::Other("SIGNATURE".to_string())
        );
        assert_eq!(String::from(BlockType::MergedCell), "MERGED_CELL");
        assert_eq!(BlockType::Other("QUERY".into()).to_string(), "QUERY");
    }

    #[test]
    fn test_block_deserialize() {
        let json = r#"{
            "Id": "c1",
            "BlockType": "CELL",
            "RowIndex": 2,
            "ColumnIndex": 3,
            "Confidence": 98.5,
            "Relationships": [{"Type": "CHILD", "Ids": ["w1", "w2"]}]
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();

        assert_eq!(block.id, "c1");
        assert!(block.is_cell());
        assert_eq!(block.row_index, Some(2));
        assert_eq!(block.column_index, Some(3));
        assert_eq!(block.child_ids().collect::<Vec<_>>(), vec!["w1", "w2"]);
    }

    #[test]
    fn test_relationship_single_id() {
        let json = r#"{"Type": "CHILD", "Id": "w9"}"#;
        let rel: Relationship = serde_json::from_str(json).unwrap();
        assert!(rel.is_child());
        assert_eq!(rel.ids, vec!["w9".to_string()]);
    }

    #[test]
    fn test_child_ids_skip_other_relationships() {
        let mut block = Block::table("t1").with_children(["c1"]);
        block.relationships.push(Relationship {
            relationship_type: RelationshipType::MergedCell,
            ids: vec!["m1".to_string()],
        });
        block = block.with_children(["c2"]);

        assert_eq!(block.child_ids().collect::<Vec<_>>(), vec!["c1", "c2"]);
    }

    #[test]
    fn test_collection_duplicate_ids() {
        let blocks = BlockCollection::from_blocks(vec![
            Block::word("w1", "first"),
            Block::word("w1", "second"),
        ]);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks.get("w1").unwrap().text.as_deref(), Some("second"));
    }

    #[test]
    fn test_collection_tables_in_order() {
        let blocks: BlockCollection = vec![
            Block::table("t2"),
            Block::word("w1", "x"),
            Block::table("t1"),
        ]
        .into_iter()
        .collect();

        let ids: Vec<_> = blocks.tables().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t1"]);
        assert_eq!(blocks.count_by_type()[&BlockType::Table], 2);
    }
}
