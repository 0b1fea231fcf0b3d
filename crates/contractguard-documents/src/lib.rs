//! ContractGuard Documents
//!
//! Turns uploaded contract files into plain text.
//!
//! # Supported formats
//!
//! - PDF (`application/pdf`)
//! - DOCX (`application/vnd.openxmlformats-officedocument.wordprocessingml.document`)
//! - Plain text (`text/plain`, UTF-8)
//!
//! Anything else fails with [`DocumentError::UnsupportedFormat`] before a
//! single byte is parsed. Parser failures surface verbatim as
//! [`DocumentError::Extraction`]; nothing is retried.
//!
//! # Example
//!
//! ```
//! use contractguard_documents::{TextExtractor, Upload};
//!
//! let extractor = TextExtractor::default();
//! let upload = Upload::new(b"Tenant shall pay rent monthly.".to_vec())
//!     .with_content_type("text/plain; charset=utf-8");
//!
//! let text = extractor.extract(&upload).unwrap();
//! assert_eq!(text, "Tenant shall pay rent monthly.");
//! ```

#![warn(missing_docs)]

mod clean;
mod docx;
mod error;
mod kind;
mod pdf;

pub use clean::{clean_text, validate_text};
pub use error::DocumentError;
pub use kind::DocumentKind;

use tracing::info;

/// Default upload limit: 16 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// An uploaded file as received from a client
#[derive(Debug, Clone, Default)]
pub struct Upload {
    /// Raw file contents
    pub bytes: Vec<u8>,
    /// Declared MIME type, if any
    pub content_type: Option<String>,
    /// Client-side file name, if any
    pub filename: Option<String>,
}

impl Upload {
    /// Create an upload with no declared type or name
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: None,
            filename: None,
        }
    }

    /// Set the declared MIME type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the file name
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Size-limited text extractor
#[derive(Debug, Clone)]
pub struct TextExtractor {
    max_bytes: usize,
}

impl TextExtractor {
    /// Create an extractor that refuses uploads larger than `max_bytes`
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Upload limit in bytes
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Detect the upload's format and extract its text
    pub fn extract(&self, upload: &Upload) -> Result<String, DocumentError> {
        if upload.bytes.len() > self.max_bytes {
            return Err(DocumentError::TooLarge {
                size: upload.bytes.len(),
                limit: self.max_bytes,
            });
        }

        let kind = DocumentKind::detect(upload.content_type.as_deref(), upload.filename.as_deref())?;
        extract_text(&upload.bytes, kind)
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

/// Extract and clean text from bytes of a known format
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, DocumentError> {
    let raw = match kind {
        DocumentKind::Pdf => pdf::extract(bytes)?,
        DocumentKind::Docx => docx::extract(bytes)?,
        DocumentKind::PlainText => std::str::from_utf8(bytes)
            .map_err(|e| DocumentError::extraction(kind, format!("not valid UTF-8: {}", e)))?
            .to_string(),
    };

    let text = clean_text(&raw);
    if text.is_empty() {
        return Err(DocumentError::extraction(kind, "no readable text found"));
    }

    info!("Extracted {} characters from {}", text.chars().count(), kind);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_extraction() {
        let text = extract_text(b"  Rent is due   monthly.\r\n", DocumentKind::PlainText).unwrap();
        assert_eq!(text, "Rent is due monthly.");
    }

    #[test]
    fn test_invalid_utf8_is_extraction_error() {
        let result = extract_text(&[0xff, 0xfe, 0x41], DocumentKind::PlainText);
        assert!(matches!(result, Err(DocumentError::Extraction { .. })));
    }

    #[test]
    fn test_whitespace_only_is_extraction_error() {
        let result = extract_text(b" \n\t ", DocumentKind::PlainText);
        assert!(matches!(result, Err(DocumentError::Extraction { .. })));
    }

    #[test]
    fn test_unsupported_type_rejected_before_parsing() {
        let extractor = TextExtractor::default();
        let upload = Upload::new(b"\x89PNG....".to_vec()).with_content_type("image/png");
        assert!(matches!(
            extractor.extract(&upload),
            Err(DocumentError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_too_large_upload() {
        let extractor = TextExtractor::new(8);
        let upload = Upload::new(vec![b'a'; 9]).with_content_type("text/plain");
        assert!(matches!(
            extractor.extract(&upload),
            Err(DocumentError::TooLarge { size: 9, limit: 8 })
        ));
    }

    #[test]
    fn test_extension_fallback_for_generic_type() {
        let extractor = TextExtractor::default();
        let upload = Upload::new(b"Lease terms".to_vec())
            .with_content_type("application/octet-stream")
            .with_filename("lease.TXT");
        assert_eq!(extractor.extract(&upload).unwrap(), "Lease terms");
    }

    #[test]
    fn test_corrupt_pdf_is_extraction_error() {
        let extractor = TextExtractor::default();
        let upload = Upload::new(b"%PDF-1.4 garbage".to_vec()).with_content_type("application/pdf");
        assert!(matches!(
            extractor.extract(&upload),
            Err(DocumentError::Extraction { kind: DocumentKind::Pdf, .. })
        ));
    }
}
