//! Analyzer that replays a saved service response.

use std::path::Path;

use crate::error::Result;
use crate::model::BlockCollection;
use crate::parser::{parse_response_bytes, parse_response_file, parse_response_str};

use super::DocumentAnalyzer;

/// Returns the same recorded block graph for every document.
///
/// Useful offline, against responses captured from the service.
#[derive(Debug, Clone)]
pub struct RecordedAnalyzer {
    blocks: BlockCollection,
}

impl RecordedAnalyzer {
    /// Replay an already decoded block collection.
    pub fn new(blocks: BlockCollection) -> Self {
        Self { blocks }
    }

    /// Replay a response given as a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(parse_response_str(json)?))
    }

    /// Replay a response given as JSON bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self::new(parse_response_bytes(data)?))
    }

    /// Replay a response saved to a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(parse_response_file(path)?))
    }

    /// The recorded blocks.
    pub fn blocks(&self) -> &BlockCollection {
        &self.blocks
    }
}

impl DocumentAnalyzer for RecordedAnalyzer {
    fn name(&self) -> &str {
        "recorded"
    }

    fn analyze(&self, _document: &[u8]) -> Result<BlockCollection> {
        Ok(self.blocks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_analyzer_replays() {
        let analyzer =
            RecordedAnalyzer::from_json(r#"[{"Id": "w1", "BlockType": "WORD", "Text": "x"}]"#)
                .unwrap();
        assert_eq!(analyzer.name(), "recorded");

        let first = analyzer.analyze(b"one").unwrap();
        let second = analyzer.analyze(b"two").unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_recorded_analyzer_rejects_empty_response() {
        assert!(RecordedAnalyzer::from_bytes(br#"{"Blocks": []}"#).is_err());
    }
}
