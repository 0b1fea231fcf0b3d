//! DOCX text extraction
//!
//! Reads `word/document.xml` out of the archive and walks the
//! WordprocessingML body in document order. Paragraphs become lines; inside
//! tables, cell paragraphs are space-joined and each row ends a line.

use crate::error::DocumentError;
use crate::kind::DocumentKind;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

const DOCUMENT_PART: &str = "word/document.xml";

pub(crate) fn extract(bytes: &[u8]) -> Result<String, DocumentError> {
    let fail = |reason: String| DocumentError::extraction(DocumentKind::Docx, reason);

    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| fail(format!("not a DOCX archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| fail(format!("missing {}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| fail(format!("unreadable {}: {}", DOCUMENT_PART, e)))?;

    body_text(&xml).map_err(fail)
}

fn body_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut in_text_run = false;
    let mut table_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = true,
                b"w:tbl" => table_depth += 1,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:p" if table_depth > 0 => out.push(' '),
                b"w:p" => out.push('\n'),
                b"w:tr" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let text = t.unescape().map_err(|e| format!("bad text run: {}", e))?;
                out.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "malformed XML at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_become_lines() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>1. Rent is $1,500.</w:t></w:r></w:p>\
             <w:p><w:r><w:t xml:space=\"preserve\">2. Late fee </w:t></w:r><w:r><w:t>is $150.</w:t></w:r></w:p>",
        );
        let text = extract(&bytes).unwrap();
        assert_eq!(text, "1. Rent is $1,500.\n2. Late fee is $150.\n");
    }

    #[test]
    fn test_table_rows_are_space_joined() {
        let bytes = docx_with_body(
            "<w:tbl><w:tr>\
               <w:tc><w:p><w:r><w:t>Deposit</w:t></w:r></w:p></w:tc>\
               <w:tc><w:p><w:r><w:t>$2,000</w:t></w:r></w:p></w:tc>\
             </w:tr></w:tbl>",
        );
        let text = extract(&bytes).unwrap();
        assert_eq!(text.trim(), "Deposit $2,000");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let bytes = docx_with_body("<w:p><w:r><w:t>Landlord &amp; Tenant</w:t></w:r></w:p>");
        assert_eq!(extract(&bytes).unwrap().trim(), "Landlord & Tenant");
    }

    #[test]
    fn test_not_a_zip() {
        let result = extract(b"plain bytes");
        assert!(matches!(
            result,
            Err(DocumentError::Extraction { kind: DocumentKind::Docx, .. })
        ));
    }

    #[test]
    fn test_zip_without_document_part() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract(&bytes).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"));
    }
}
