//! PDF text extraction

use crate::error::DocumentError;
use crate::kind::DocumentKind;
use lopdf::Document;
use tracing::{debug, info};

/// Extract the text of every page, each preceded by a page marker
pub(crate) fn extract(bytes: &[u8]) -> Result<String, DocumentError> {
    let document = Document::load_mem(bytes)
        .map_err(|e| DocumentError::extraction(DocumentKind::Pdf, e.to_string()))?;

    if document.is_encrypted() {
        return Err(DocumentError::extraction(
            DocumentKind::Pdf,
            "document is encrypted",
        ));
    }

    let pages = document.get_pages();
    info!("Processing PDF with {} pages", pages.len());

    let mut text = String::new();
    for page_number in pages.keys() {
        let page_text = document
            .extract_text(&[*page_number])
            .map_err(|e| DocumentError::extraction(DocumentKind::Pdf, e.to_string()))?;
        debug!("Page {}: {} chars", page_number, page_text.len());

        text.push_str(&format!("\n--- Page {} ---\n", page_number));
        text.push_str(&page_text);
    }

    Ok(text)
}
