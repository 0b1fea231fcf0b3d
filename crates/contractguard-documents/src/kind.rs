//! Format detection from declared MIME type and file name

use crate::error::DocumentError;
use std::fmt;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Portable Document Format
    Pdf,
    /// Office Open XML word processing document
    Docx,
    /// UTF-8 plain text
    PlainText,
}

impl DocumentKind {
    /// Map a MIME type (parameters ignored) to a kind
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "application/pdf" => Some(DocumentKind::Pdf),
            DOCX_MIME => Some(DocumentKind::Docx),
            "text/plain" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    /// Map a file extension (case-insensitive) to a kind
    pub fn from_extension(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "txt" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    /// Decide the format of an upload
    ///
    /// A specific declared MIME type is authoritative. The file name is only
    /// consulted when the type is missing or `application/octet-stream`.
    pub fn detect(content_type: Option<&str>, filename: Option<&str>) -> Result<Self, DocumentError> {
        let declared = content_type.map(str::trim).filter(|ct| !ct.is_empty());

        match declared {
            Some(ct) if !is_generic(ct) => {
                Self::from_mime(ct).ok_or_else(|| DocumentError::UnsupportedFormat(ct.to_string()))
            }
            _ => filename.and_then(Self::from_extension).ok_or_else(|| {
                let shown = filename.or(declared).unwrap_or("unknown");
                DocumentError::UnsupportedFormat(shown.to_string())
            }),
        }
    }

    /// Canonical MIME type
    pub fn mime(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Docx => DOCX_MIME,
            DocumentKind::PlainText => "text/plain",
        }
    }
}

fn is_generic(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case("application/octet-stream"))
        .unwrap_or(false)
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Docx => "DOCX",
            DocumentKind::PlainText => "text",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime() {
        assert_eq!(DocumentKind::from_mime("application/pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_mime(DOCX_MIME), Some(DocumentKind::Docx));
        assert_eq!(
            DocumentKind::from_mime("Text/Plain; charset=UTF-8"),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(DocumentKind::from_mime("application/msword"), None);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(DocumentKind::from_extension("lease.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_extension("offer.docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_extension("nda.txt"), Some(DocumentKind::PlainText));
        assert_eq!(DocumentKind::from_extension("contract.doc"), None);
        assert_eq!(DocumentKind::from_extension("README"), None);
    }

    #[test]
    fn test_specific_mime_wins_over_extension() {
        let result = DocumentKind::detect(Some("image/png"), Some("scan.pdf"));
        assert_eq!(result, Err(DocumentError::UnsupportedFormat("image/png".to_string())));
    }

    #[test]
    fn test_generic_mime_falls_back_to_extension() {
        assert_eq!(
            DocumentKind::detect(Some("application/octet-stream"), Some("a.docx")),
            Ok(DocumentKind::Docx)
        );
        assert_eq!(DocumentKind::detect(None, Some("a.pdf")), Ok(DocumentKind::Pdf));
    }

    #[test]
    fn test_nothing_declared_is_unsupported() {
        assert!(matches!(
            DocumentKind::detect(None, None),
            Err(DocumentError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            DocumentKind::detect(Some("application/octet-stream"), Some("image.png")),
            Err(DocumentError::UnsupportedFormat(name)) if name == "image.png"
        ));
    }
}
