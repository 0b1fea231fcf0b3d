//! Error types for document extraction

use crate::kind::DocumentKind;
use thiserror::Error;

/// Errors that can occur while turning an upload into text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// Declared type is not PDF, DOCX or plain text
    #[error("Unsupported file type: {0}. Please upload PDF, DOCX, or TXT")]
    UnsupportedFormat(String),

    /// Upload exceeds the size limit
    #[error("File too large: {size} bytes (max: {limit})")]
    TooLarge {
        /// Upload size in bytes
        size: usize,
        /// Configured limit in bytes
        limit: usize,
    },

    /// The parser could not read the file
    #[error("Failed to process {kind}: {reason}")]
    Extraction {
        /// Format that failed
        kind: DocumentKind,
        /// Parser message
        reason: String,
    },
}

impl DocumentError {
    pub(crate) fn extraction(kind: DocumentKind, reason: impl Into<String>) -> Self {
        DocumentError::Extraction {
            kind,
            reason: reason.into(),
        }
    }
}
