//! Benchmarks for table assembly performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic block graphs shaped like a service
//! response: TABLE -> CELL -> WORD.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use untextract::model::{Block, BlockCollection, BlockType};

/// Creates a response with `tables` tables of `rows` x `cols` cells, two words per cell.
fn create_test_response(tables: usize, rows: u32, cols: u32) -> String {
    let mut blocks = Vec::new();

    for t in 0..tables {
        let cell_ids: Vec<String> = (0..rows * cols).map(|i| format!("t{}c{}", t, i)).collect();
        blocks.push(Block::table(format!("t{}", t)).with_children(cell_ids.clone()));

        for (i, cell_id) in cell_ids.iter().enumerate() {
            let i = i as u32;
            let words = [format!("{}w0", cell_id), format!("{}w1", cell_id)];
            blocks.push(
                Block::cell(cell_id, i / cols + 1, i % cols + 1).with_children(words.clone()),
            );
            blocks.push(Block::word(&words[0], "value"));
            blocks.push(Block::word(&words[1], format!("{}", i)));
        }
    }

    serde_json::json!({ "Blocks": blocks }).to_string()
}

/// Creates a single cell whose text sits at the end of a long child chain.
fn create_deep_chain(depth: usize) -> BlockCollection {
    let mut blocks = vec![
        Block::table("t").with_children(["c"]),
        Block::cell("c", 1, 1).with_children(["n0"]),
    ];
    for i in 0..depth {
        blocks.push(
            Block::new(format!("n{}", i), BlockType::Line).with_children([format!("n{}", i + 1)]),
        );
    }
    blocks.push(Block::word(format!("n{}", depth), "leaf"));
    BlockCollection::from_blocks(blocks)
}

/// Benchmark response decoding.
fn bench_response_decoding(c: &mut Criterion) {
    let json = create_test_response(10, 20, 5);

    c.bench_function("decode_10_tables", |b| {
        b.iter(|| untextract::parse_response_str(black_box(&json)).unwrap());
    });
}

/// Benchmark assembly at various sizes.
fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");

    for table_count in [1, 10, 50].iter() {
        let json = create_test_response(*table_count, 20, 5);
        let blocks = untextract::parse_response_str(&json).unwrap();

        group.bench_function(format!("{}_tables", table_count), |b| {
            b.iter(|| untextract::extract_tables(black_box(&blocks)));
        });
    }

    group.finish();
}

/// Benchmark the recursion guard on a chain longer than the depth limit.
fn bench_depth_guard(c: &mut Criterion) {
    let blocks = create_deep_chain(1_000);

    c.bench_function("deep_chain_bounded", |b| {
        b.iter(|| untextract::extract_tables(black_box(&blocks)));
    });
}

criterion_group!(
    benches,
    bench_response_decoding,
    bench_assembly,
    bench_depth_guard,
);
criterion_main!(benches);
