//! Plain-text extraction from Word documents.
//!
//! A `.docx` file is a ZIP archive whose body text lives in
//! `word/document.xml`. The converter walks that part with SAX-style event
//! processing, concatenating text runs (`<w:t>`) and mapping paragraph ends,
//! line breaks, and tabs to whitespace. Legacy binary `.doc` files are not
//! ZIP archives and fail at the archive-open step, which callers treat as an
//! ordinary extraction failure.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocxError {
    #[error("failed to open document archive: {0}")]
    Archive(String),
    #[error("word/document.xml missing from archive")]
    MissingDocumentXml,
    #[error("failed to read document XML: {0}")]
    Read(String),
    #[error("failed to parse document XML: {0}")]
    Xml(String),
}

/// Extract the plain text of a `.docx` document held in memory.
pub fn extract_text(bytes: &[u8]) -> Result<String, DocxError> {
    let cursor = Cursor::new(bytes);
    let mut archive =
        zip::ZipArchive::new(cursor).map_err(|e| DocxError::Archive(e.to_string()))?;

    let mut part = archive
        .by_name("word/document.xml")
        .map_err(|_| DocxError::MissingDocumentXml)?;

    let mut xml = Vec::with_capacity(part.size() as usize);
    part.read_to_end(&mut xml)
        .map_err(|e| DocxError::Read(e.to_string()))?;

    parse_document_xml(&xml)
}

/// Walk `word/document.xml`, collecting the text content of `<w:t>` runs.
///
/// `<w:p>` (paragraph), `<w:br>` (line break), and `<w:cr>` end a line;
/// `<w:tab>` becomes a tab. Everything else is structure and is skipped.
fn parse_document_xml(xml: &[u8]) -> Result<String, DocxError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::with_capacity(4096);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = true,
                b"w:br" | b"w:cr" => text.push('\n'),
                b"w:tab" => text.push('\t'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:br" | b"w:cr" => text.push('\n'),
                b"w:tab" => text.push('\t'),
                _ => {}
            },
            Ok(Event::Text(ref t)) if in_text_run => {
                let chunk = t
                    .unescape()
                    .map_err(|e| DocxError::Xml(e.to_string()))?;
                text.push_str(&chunk);
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(DocxError::Xml(e.to_string())),
        }
        buf.clear();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Build an in-memory .docx containing the given document.xml body.
    fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn extracts_paragraph_text() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>Expires: 01/15/2024</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Second paragraph</w:t></w:r></w:p>",
        );
        let text = extract_text(&bytes).unwrap();
        assert_eq!(text, "Expires: 01/15/2024\nSecond paragraph\n");
    }

    #[test]
    fn joins_runs_within_a_paragraph() {
        let bytes =
            docx_with_body("<w:p><w:r><w:t>Valid until </w:t></w:r><w:r><w:t>12/31/2025</w:t></w:r></w:p>");
        let text = extract_text(&bytes).unwrap();
        assert_eq!(text, "Valid until 12/31/2025\n");
    }

    #[test]
    fn maps_breaks_and_tabs() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>a</w:t><w:br/><w:t>b</w:t><w:tab/><w:t>c</w:t></w:r></w:p>",
        );
        let text = extract_text(&bytes).unwrap();
        assert_eq!(text, "a\nb\tc\n");
    }

    #[test]
    fn ignores_structure_only_markup() {
        let bytes = docx_with_body("<w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr></w:p>");
        let text = extract_text(&bytes).unwrap();
        assert_eq!(text.trim(), "");
    }

    #[test]
    fn non_zip_bytes_fail_at_archive_open() {
        let err = extract_text(b"\xd0\xcf\x11\xe0 legacy doc header").unwrap_err();
        assert!(matches!(err, DocxError::Archive(_)));
    }

    #[test]
    fn zip_without_document_xml_fails() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"not a docx").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_text(&bytes).unwrap_err();
        assert!(matches!(err, DocxError::MissingDocumentXml));
    }
}
