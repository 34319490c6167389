//! Decoding of document-analysis responses.
//!
//! Accepts the AnalyzeDocument payload (`{"Blocks": [...], ...}`) or a bare
//! array of block records. Records are decoded one at a time so a single
//! malformed record is dropped instead of failing the whole response.

use std::io::Read;
use std::path::Path;

use serde::de::Error as _;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Block, BlockCollection};

/// Decode a response from a JSON string.
pub fn parse_response_str(json: &str) -> Result<BlockCollection> {
    let value: Value = serde_json::from_str(json)?;
    collection_from_value(value)
}

/// Decode a response from JSON bytes.
pub fn parse_response_bytes(data: &[u8]) -> Result<BlockCollection> {
    let value: Value = serde_json::from_slice(data)?;
    collection_from_value(value)
}

/// Decode a response from a reader.
pub fn parse_response_reader<R: Read>(reader: R) -> Result<BlockCollection> {
    let value: Value = serde_json::from_reader(reader)?;
    collection_from_value(value)
}

/// Decode a response saved to a file.
pub fn parse_response_file<P: AsRef<Path>>(path: P) -> Result<BlockCollection> {
    let data = std::fs::read(path)?;
    parse_response_bytes(&data)
}

/// Decode a response saved to a file without blocking the runtime.
#[cfg(feature = "async")]
pub async fn parse_response_file_async<P: AsRef<Path>>(path: P) -> Result<BlockCollection> {
    let data = tokio::fs::read(path).await?;
    parse_response_bytes(&data)
}

fn collection_from_value(value: Value) -> Result<BlockCollection> {
    let records = match value {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("Blocks") {
            Some(Value::Array(records)) => records,
            Some(Value::Null) | None => return Err(Error::NoBlocks),
            Some(_) => {
                return Err(Error::Json(serde_json::Error::custom(
                    "`Blocks` must be an array",
                )))
            }
        },
        _ => {
            return Err(Error::Json(serde_json::Error::custom(
                "expected an object with `Blocks` or an array of blocks",
            )))
        }
    };

    let total = records.len();
    let blocks: Vec<Block> = records
        .into_iter()
        .enumerate()
        .filter_map(|(idx, record)| match serde_json::from_value::<Block>(record) {
            Ok(block) => Some(block),
            Err(e) => {
                log::warn!("Skipping malformed block record {}: {}", idx, e);
                None
            }
        })
        .collect();

    if blocks.is_empty() {
        return Err(Error::NoBlocks);
    }
    if blocks.len() < total {
        log::warn!("Decoded {} of {} block records", blocks.len(), total);
    }

    Ok(BlockCollection::from_blocks(blocks))
}
