//! Integration tests for text resolution and table assembly.

use untextract::model::{Block, BlockCollection, BlockType};
use untextract::{
    extract_tables, extract_tables_with_options, parse_response_str, resolve_text, BlockFault,
    ColumnWidth, Error, ExtractOptions, RowPolicy, Table, TextResolver,
};

/// A `TABLE` block with one `CELL` per entry, each holding a single `WORD`.
fn table_with_words(table_id: &str, cells: &[(u32, u32, &str)]) -> Vec<Block> {
    let cell_ids: Vec<String> = (0..cells.len())
        .map(|i| format!("{}-c{}", table_id, i))
        .collect();
    let mut blocks = vec![Block::table(table_id).with_children(cell_ids.clone())];

    for (i, (row, col, text)) in cells.iter().enumerate() {
        let word_id = format!("{}-w{}", table_id, i);
        blocks.push(Block::cell(&cell_ids[i], *row, *col).with_children([word_id.clone()]));
        blocks.push(Block::word(word_id, *text));
    }
    blocks
}

#[test]
fn test_leaf_text_returned_unchanged() {
    let blocks = BlockCollection::from_blocks(vec![Block::word("w1", "  Total  ")]);
    assert_eq!(resolve_text("w1", &blocks), "  Total  ");
}

#[test]
fn test_children_joined_with_single_space() {
    let blocks = BlockCollection::from_blocks(vec![
        Block::cell("c1", 1, 1).with_children(["w1", "w2", "w3"]),
        Block::word("w1", "A"),
        Block::word("w2", ""),
        Block::word("w3", "B"),
    ]);
    assert_eq!(resolve_text("c1", &blocks), "A B");
}

#[test]
fn test_missing_id_resolves_empty() {
    let blocks = BlockCollection::from_blocks(vec![Block::word("w1", "x")]);
    assert_eq!(resolve_text("nope", &blocks), "");
}

#[test]
fn test_cycle_terminates() {
    let blocks = BlockCollection::from_blocks(vec![
        Block::new("a", BlockType::Line).with_children(["b"]),
        Block::new("b", BlockType::Line).with_children(["a"]),
    ]);
    assert_eq!(resolve_text("a", &blocks), "");

    let mut diagnostics = Vec::new();
    TextResolver::new(&blocks).resolve_into("a", &mut diagnostics);
    assert!(diagnostics.iter().any(|d| d.fault == BlockFault::CyclicReference));
}

#[test]
fn test_per_row_width() {
    let blocks = BlockCollection::from_blocks(table_with_words(
        "t1",
        &[(1, 1, "a"), (1, 2, "b"), (2, 1, "c")],
    ));
    let tables = extract_tables(&blocks);

    assert_eq!(tables, vec![Table::from_rows(vec![vec!["a", "b"], vec!["c"]])]);
}

#[test]
fn test_table_wide_width() {
    let blocks = BlockCollection::from_blocks(table_with_words(
        "t1",
        &[(1, 1, "a"), (1, 2, "b"), (2, 1, "c")],
    ));
    let options = ExtractOptions::new().with_column_width(ColumnWidth::TableWide);
    let result = extract_tables_with_options(&blocks, &options).unwrap();

    assert_eq!(result.tables[0].rows, vec![vec!["a", "b"], vec!["c", ""]]);
    assert!(result.tables[0].is_rectangular());
}

#[test]
fn test_blank_only_table_omitted() {
    let mut blocks = table_with_words("blank", &[(1, 1, "   "), (1, 2, "")]);
    blocks.extend(table_with_words("full", &[(1, 1, "x")]));
    blocks.push(Block::table("none"));
    let blocks = BlockCollection::from_blocks(blocks);

    let result = extract_tables_with_options(&blocks, &ExtractOptions::default()).unwrap();
    assert_eq!(result.count, 1);
    assert_eq!(result.tables[0].rows, vec![vec!["x"]]);
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.block_id == "none" && d.fault == BlockFault::EmptyTable));
}

#[test]
fn test_two_tables_keep_order() {
    let mut blocks = table_with_words("second", &[(1, 1, "B")]);
    blocks.splice(0..0, table_with_words("first", &[(1, 1, "A")]));
    let blocks = BlockCollection::from_blocks(blocks);

    let tables = extract_tables(&blocks);
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].cell(0, 0), Some("A"));
    assert_eq!(tables[1].cell(0, 0), Some("B"));
}

#[test]
fn test_missing_rows_compact_and_positional() {
    let blocks =
        BlockCollection::from_blocks(table_with_words("t1", &[(1, 1, "top"), (3, 2, "low")]));

    assert_eq!(
        extract_tables(&blocks)[0].rows,
        vec![vec!["top".to_string()], vec!["".to_string(), "low".to_string()]]
    );

    let options = ExtractOptions::new()
        .with_row_policy(RowPolicy::Positional)
        .with_column_width(ColumnWidth::TableWide);
    let result = extract_tables_with_options(&blocks, &options).unwrap();
    assert_eq!(
        result.tables[0].rows,
        vec![vec!["top", ""], vec!["", ""], vec!["", "low"]]
    );
}

#[test]
fn test_text_is_trimmed_and_last_write_wins() {
    let blocks = BlockCollection::from_blocks(vec![
        Block::table("t1").with_children(["c1", "c2"]),
        Block::cell("c1", 1, 1).with_text("  old  "),
        Block::cell("c2", 1, 1).with_text("  new  "),
    ]);
    assert_eq!(extract_tables(&blocks)[0].rows, vec![vec!["new"]]);
}

#[test]
fn test_malformed_cell_isolated_in_lenient_mode() {
    let mut malformed = Block::cell("bad", 1, 1).with_text("?");
    malformed.row_index = None;

    let mut blocks = vec![
        Block::table("t1").with_children(["bad", "good"]),
        malformed,
        Block::cell("good", 1, 2).with_text("ok"),
    ];
    blocks.extend(table_with_words("t2", &[(1, 1, "fine")]));
    let blocks = BlockCollection::from_blocks(blocks);

    let result = extract_tables_with_options(&blocks, &ExtractOptions::default()).unwrap();
    assert_eq!(result.count, 2);
    assert_eq!(result.tables[0].rows, vec![vec!["", "ok"]]);
    assert!(matches!(
        result.diagnostics[0].fault,
        BlockFault::MalformedBlock(_)
    ));

    let strict = extract_tables_with_options(&blocks, &ExtractOptions::new().strict());
    assert!(matches!(
        strict,
        Err(Error::MalformedBlock { ref block_id, .. }) if block_id == "bad"
    ));
}

#[test]
fn test_deep_graph_is_bounded() {
    let mut blocks = vec![
        Block::table("t1").with_children(["c1"]),
        Block::cell("c1", 1, 1).with_children(["n0"]),
    ];
    for i in 0..200 {
        blocks.push(
            Block::new(format!("n{}", i), BlockType::Line).with_children([format!("n{}", i + 1)]),
        );
    }
    blocks.push(Block::word("n200", "deep"));
    let blocks = BlockCollection::from_blocks(blocks);

    let result = extract_tables_with_options(&blocks, &ExtractOptions::default()).unwrap();
    assert_eq!(result.count, 0);
    assert!(result
        .diagnostics
        .iter()
        .any(|d| matches!(d.fault, BlockFault::ResolutionDepthExceeded { limit: 32 })));

    let deep = ExtractOptions::new().with_max_depth(256);
    let result = extract_tables_with_options(&blocks, &deep).unwrap();
    assert_eq!(result.tables[0].rows, vec![vec!["deep"]]);
}

#[test]
fn test_decoded_response_end_to_end() {
    let json = r#"{
        "DocumentMetadata": {"Pages": 1},
        "Blocks": [
            {"Id": "p1", "BlockType": "PAGE", "Relationships": [{"Type": "CHILD", "Ids": ["t1"]}]},
            {"Id": "t1", "BlockType": "TABLE", "Relationships": [{"Type": "CHILD", "Ids": ["c1", "c2", "s1"]}]},
            {"Id": "c1", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 1,
             "Relationships": [{"Type": "CHILD", "Ids": ["w1", "w2"]}]},
            {"Id": "c2", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 2,
             "Relationships": [{"Type": "CHILD", "Ids": ["w3"]}]},
            {"Id": "s1", "BlockType": "SELECTION_ELEMENT", "SelectionStatus": "SELECTED"},
            {"Id": "w1", "BlockType": "WORD", "Text": "Unit"},
            {"Id": "w2", "BlockType": "WORD", "Text": "price"},
            {"Id": "w3", "BlockType": "WORD", "Text": "4.50", "Confidence": 99.1}
        ]
    }"#;

    let blocks = parse_response_str(json).unwrap();
    let tables = extract_tables(&blocks);
    assert_eq!(tables, vec![Table::from_rows([["Unit price", "4.50"]])]);
}

#[test]
fn test_no_tables_is_a_valid_result() {
    let blocks = BlockCollection::from_blocks(vec![Block::word("w1", "hello")]);
    let result = extract_tables_with_options(&blocks, &ExtractOptions::default()).unwrap();
    assert_eq!(result.count, 0);
    assert!(result.is_empty());
}

#[test]
fn test_extreme_indices_do_not_allocate() {
    let json = r#"{"Blocks": [
        {"Id": "t1", "BlockType": "TABLE", "Relationships": [{"Type": "CHILD", "Ids": ["c1", "c2", "c3", "c4"]}]},
        {"Id": "c1", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 1, "Text": "a"},
        {"Id": "c2", "BlockType": "CELL", "RowIndex": 1, "ColumnIndex": 4294967295, "Text": "wide"},
        {"Id": "c3", "BlockType": "CELL", "RowIndex": 4294967295, "ColumnIndex": 1, "Text": "tall"},
        {"Id": "c4", "BlockType": "CELL", "RowIndex": 4000, "ColumnIndex": 1, "Text": "b"}
    ]}"#;
    let blocks = parse_response_str(json).unwrap();

    assert_eq!(extract_tables(&blocks)[0].rows, vec![vec!["a"], vec!["b"]]);

    let result = extract_tables_with_options(&blocks, &ExtractOptions::default()).unwrap();
    let rejected: Vec<&str> = result
        .diagnostics
        .iter()
        .filter(|d| matches!(d.fault, BlockFault::MalformedBlock(_)))
        .map(|d| d.block_id.as_str())
        .collect();
    assert_eq!(rejected, vec!["c2", "c3"]);

    let positional = ExtractOptions::new().with_row_policy(RowPolicy::Positional);
    let result = extract_tables_with_options(&blocks, &positional).unwrap();
    assert_eq!(result.tables[0].row_count(), 4000);

    let strict = extract_tables_with_options(&blocks, &ExtractOptions::new().strict());
    assert!(matches!(
        strict,
        Err(Error::MalformedBlock { ref block_id, .. }) if block_id == "c2"
    ));
}

#[test]
fn test_shared_subgraph_is_bounded() {
    // Every node at one level lists both nodes of the next level.
    let mut blocks = vec![
        Block::table("t1").with_children(["c1"]),
        Block::cell("c1", 1, 1).with_children(["l0a"]),
    ];
    for level in 0..28 {
        let next = [format!("l{}a", level + 1), format!("l{}b", level + 1)];
        for side in ["a", "b"] {
            blocks.push(
                Block::new(format!("l{}{}", level, side), BlockType::Line)
                    .with_children(next.clone()),
            );
        }
    }
    blocks.push(Block::word("l28a", "x"));
    blocks.push(Block::word("l28b", "y"));
    let blocks = BlockCollection::from_blocks(blocks);

    let result = extract_tables_with_options(&blocks, &ExtractOptions::default()).unwrap();
    assert_eq!(result.count, 1);
    assert!(result.tables[0].rows[0][0].len() < 20_000);
    assert!(result
        .diagnostics
        .iter()
        .any(|d| matches!(d.fault, BlockFault::ResolutionBudgetExceeded { limit: 10_000 })));
}
