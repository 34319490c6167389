//! Document type detection and upload validation.
//!
//! Checks a caller runs before sending a document to the analysis service:
//! an accepted extension, non-empty content and a size limit.

use crate::error::{Error, Result};
use std::path::Path;

/// Default upload size limit: 10 MiB.
pub const DEFAULT_MAX_SIZE: u64 = 10 * 1024 * 1024;

/// Extensions accepted by default (lowercase, no dot).
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "pdf"];

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = b"\xff\xd8\xff";
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Kind of document submitted for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
    /// PDF document
    Pdf,
}

impl DocumentKind {
    /// Map a file extension (case-insensitive, no dot) to a kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(DocumentKind::Png),
            "jpg" | "jpeg" => Some(DocumentKind::Jpeg),
            "pdf" => Some(DocumentKind::Pdf),
            _ => None,
        }
    }

    /// MIME type of this kind.
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Png => "image/png",
            DocumentKind::Jpeg => "image/jpeg",
            DocumentKind::Pdf => "application/pdf",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DocumentKind::Png => "PNG",
            DocumentKind::Jpeg => "JPEG",
            DocumentKind::Pdf => "PDF",
        };
        f.write_str(name)
    }
}

/// Rules for accepting a document upload.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    /// Maximum size in bytes
    pub max_size: u64,

    /// Accepted extensions, lowercase without the leading dot
    pub allowed_extensions: Vec<String>,
}

impl UploadPolicy {
    /// Create a policy with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size limit in bytes.
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }

    /// Replace the accepted extensions.
    pub fn with_extensions<S: AsRef<str>>(mut self, exts: impl IntoIterator<Item = S>) -> Self {
        self.allowed_extensions = exts
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Check if an extension is accepted.
    pub fn allows_extension(&self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        self.allowed_extensions.iter().any(|e| *e == ext)
    }

    fn check_name(&self, file_name: &str) -> Result<DocumentKind> {
        if file_name.trim().is_empty() {
            return Err(Error::UnsupportedFileType("no file name".into()));
        }
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFileType(format!("{} has no extension", file_name)))?;

        if !self.allows_extension(ext) {
            return Err(Error::UnsupportedFileType(format!(".{}", ext.to_lowercase())));
        }
        DocumentKind::from_extension(ext)
            .ok_or_else(|| Error::UnsupportedFileType(format!(".{}", ext.to_lowercase())))
    }

    fn check_size(&self, size: u64) -> Result<()> {
        if size == 0 {
            return Err(Error::EmptyDocument);
        }
        if size > self.max_size {
            return Err(Error::FileTooLarge {
                size,
                limit: self.max_size,
            });
        }
        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Validate a file on disk against an upload policy.
///
/// # Example
/// ```no_run
/// use untextract::detect::{validate_path, UploadPolicy};
///
/// let kind = validate_path("scan.png", &UploadPolicy::default()).unwrap();
/// println!("{} ({})", kind, kind.mime_type());
/// ```
pub fn validate_path<P: AsRef<Path>>(path: P, policy: &UploadPolicy) -> Result<DocumentKind> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let kind = policy.check_name(file_name)?;

    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(Error::UnsupportedFileType(format!(
            "{} is not a regular file",
            path.display()
        )));
    }
    policy.check_size(metadata.len())?;

    Ok(kind)
}

/// Validate in-memory document bytes against an upload policy.
pub fn validate_bytes(data: &[u8], file_name: &str, policy: &UploadPolicy) -> Result<DocumentKind> {
    let kind = policy.check_name(file_name)?;
    policy.check_size(data.len() as u64)?;
    Ok(kind)
}

/// Detect the document kind from its leading bytes.
pub fn detect_kind_from_bytes(data: &[u8]) -> Option<DocumentKind> {
    if data.starts_with(PNG_MAGIC) {
        Some(DocumentKind::Png)
    } else if data.starts_with(JPEG_MAGIC) {
        Some(DocumentKind::Jpeg)
    } else if data.starts_with(PDF_MAGIC) {
        Some(DocumentKind::Pdf)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_magic() {
        assert_eq!(
            detect_kind_from_bytes(b"\x89PNG\r\n\x1a\n\0\0"),
            Some(DocumentKind::Png)
        );
        assert_eq!(
            detect_kind_from_bytes(b"\xff\xd8\xff\xe0"),
            Some(DocumentKind::Jpeg)
        );
        assert_eq!(detect_kind_from_bytes(b"%PDF-1.7"), Some(DocumentKind::Pdf));
        assert_eq!(detect_kind_from_bytes(b"GIF89a"), None);
        assert_eq!(detect_kind_from_bytes(b""), None);
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(DocumentKind::from_extension("JPG"), Some(DocumentKind::Jpeg));
        assert_eq!(DocumentKind::from_extension("jpeg"), Some(DocumentKind::Jpeg));
        assert_eq!(DocumentKind::from_extension("gif"), None);
        assert_eq!(DocumentKind::Pdf.mime_type(), "application/pdf");
    }

    #[test]
    fn test_validate_bytes() {
        let policy = UploadPolicy::default();
        assert_eq!(
            validate_bytes(b"data", "Scan.PNG", &policy).unwrap(),
            DocumentKind::Png
        );
        assert!(matches!(
            validate_bytes(b"data", "anim.gif", &policy),
            Err(Error::UnsupportedFileType(ext)) if ext == ".gif"
        ));
        assert!(matches!(
            validate_bytes(b"data", "", &policy),
            Err(Error::UnsupportedFileType(_))
        ));
        assert!(matches!(
            validate_bytes(b"data", "README", &policy),
            Err(Error::UnsupportedFileType(_))
        ));
        assert!(matches!(
            validate_bytes(b"", "scan.png", &policy),
            Err(Error::EmptyDocument)
        ));
    }

    #[test]
    fn test_size_limit() {
        let policy = UploadPolicy::new().with_max_size(4);
        assert!(validate_bytes(b"1234", "a.pdf", &policy).is_ok());
        assert!(matches!(
            validate_bytes(b"12345", "a.pdf", &policy),
            Err(Error::FileTooLarge { size: 5, limit: 4 })
        ));
    }

    #[test]
    fn test_custom_extensions() {
        let policy = UploadPolicy::new().with_extensions([".PDF"]);
        assert!(policy.allows_extension("pdf"));
        assert!(!policy.allows_extension("png"));
        assert!(validate_bytes(b"x", "a.png", &policy).is_err());
    }

    #[test]
    fn test_validate_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.jpg");
        std::fs::write(&path, b"\xff\xd8\xff\xe0data").unwrap();

        let kind = validate_path(&path, &UploadPolicy::default()).unwrap();
        assert_eq!(kind, DocumentKind::Jpeg);

        let missing = dir.path().join("missing.png");
        assert!(matches!(
            validate_path(&missing, &UploadPolicy::default()),
            Err(Error::Io(_))
        ));
    }
}
