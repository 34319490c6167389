//! Document analyzer seam and the end-to-end extraction pipeline.
//!
//! The analysis service is reached through a [`DocumentAnalyzer`] passed in
//! as an [`AnalyzerHandle`]. A handle is either available or carries the
//! reason it is not, which [`AnalyzerHandle::health`] reports.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use untextract::analyze::{AnalyzerHandle, RecordedAnalyzer, TableExtractor};
//!
//! fn main() -> untextract::Result<()> {
//!     let analyzer = RecordedAnalyzer::from_file("response.json")?;
//!     let extractor = TableExtractor::new(AnalyzerHandle::available(Arc::new(analyzer)));
//!
//!     let result = extractor.extract_path("invoice.png")?;
//!     println!("{} tables", result.count);
//!     Ok(())
//! }
//! ```

mod recorded;

pub use recorded::RecordedAnalyzer;

use crate::detect::{validate_bytes, validate_path, UploadPolicy};
use crate::error::{Error, Result};
use crate::model::{BlockCollection, ExtractionResult};
use crate::parser::{ExtractOptions, TableAssembler};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// A client of the document-analysis service.
///
/// Implement this trait to plug in a service client.
pub trait DocumentAnalyzer: Send + Sync {
    /// Get the name of this analyzer.
    fn name(&self) -> &str;

    /// Analyze a document and return its block graph.
    fn analyze(&self, document: &[u8]) -> Result<BlockCollection>;
}

/// Shared handle to an analyzer, or the reason there is none.
#[derive(Clone)]
pub struct AnalyzerHandle {
    inner: std::result::Result<Arc<dyn DocumentAnalyzer>, String>,
}

impl AnalyzerHandle {
    /// Wrap a ready analyzer.
    pub fn available(analyzer: Arc<dyn DocumentAnalyzer>) -> Self {
        Self { inner: Ok(analyzer) }
    }

    /// Record that the analyzer failed to initialize.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            inner: Err(reason.into()),
        }
    }

    /// Check if an analyzer is configured.
    pub fn is_available(&self) -> bool {
        self.inner.is_ok()
    }

    /// Get the analyzer.
    pub fn get(&self) -> Result<&Arc<dyn DocumentAnalyzer>> {
        self.inner
            .as_ref()
            .map_err(|reason| Error::AnalyzerUnavailable(reason.clone()))
    }

    /// Liveness signal for the surrounding service.
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            analyzer_available: self.is_available(),
        }
    }
}

impl std::fmt::Debug for AnalyzerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            Ok(analyzer) => f
                .debug_tuple("AnalyzerHandle::Available")
                .field(&analyzer.name())
                .finish(),
            Err(reason) => f
                .debug_tuple("AnalyzerHandle::Unavailable")
                .field(reason)
                .finish(),
        }
    }
}

/// Health payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always `"healthy"` while the process is serving
    pub status: String,

    /// Whether an analyzer is configured
    pub analyzer_available: bool,
}

/// Validates a document, runs the analyzer, and assembles tables.
#[derive(Debug, Clone)]
pub struct TableExtractor {
    handle: AnalyzerHandle,
    options: ExtractOptions,
    policy: UploadPolicy,
}

impl TableExtractor {
    /// Create an extractor with default options and upload policy.
    pub fn new(handle: AnalyzerHandle) -> Self {
        Self {
            handle,
            options: ExtractOptions::default(),
            policy: UploadPolicy::default(),
        }
    }

    /// Set extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the upload policy.
    pub fn with_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Get the analyzer handle.
    pub fn handle(&self) -> &AnalyzerHandle {
        &self.handle
    }

    /// Health of the underlying analyzer handle.
    pub fn health(&self) -> HealthStatus {
        self.handle.health()
    }

    /// Extract tables from a document on disk.
    pub fn extract_path<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionResult> {
        let path = path.as_ref();
        let analyzer = self.handle.get()?;
        let kind = validate_path(path, &self.policy)?;

        let data = std::fs::read(path)?;
        log::info!("Processing file: {} ({})", path.display(), kind);
        self.run(&**analyzer, &data)
    }

    /// Extract tables from document bytes; `file_name` selects the type.
    pub fn extract_bytes(&self, data: &[u8], file_name: &str) -> Result<ExtractionResult> {
        let analyzer = self.handle.get()?;
        let kind = validate_bytes(data, file_name, &self.policy)?;

        log::info!("Processing file: {} ({})", file_name, kind);
        self.run(&**analyzer, data)
    }

    fn run(&self, analyzer: &dyn DocumentAnalyzer, data: &[u8]) -> Result<ExtractionResult> {
        log::info!("Sending {} bytes to {}", data.len(), analyzer.name());
        let blocks = analyzer.analyze(data).map_err(|e| match e {
            Error::NoBlocks | Error::Upstream(_) => e,
            other => Error::Upstream(other.to_string()),
        })?;
        if blocks.is_empty() {
            return Err(Error::NoBlocks);
        }

        let result = TableAssembler::new(self.options.clone()).extract(&blocks)?;
        log::info!("Successfully extracted {} tables", result.count);
        Ok(result)
    }
}
